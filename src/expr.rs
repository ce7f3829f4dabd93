//! Flat sums/differences of terms: `term (('+' | '-') term)*`. A term is a
//! name (resolved via the symbol table), an integer literal (interpreted in
//! the current base), or `.` (the current location counter).
//!
//! There is no precedence, no parentheses, no multiplication: this dialect
//! composes expressions left-to-right only.
//!
//! Unresolved names are represented with [`ExprValue::Deferred`] rather than
//! a sentinel value: a deferred value cannot silently flow into further
//! arithmetic without the caller noticing.

use crate::base::Base;
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::symtab::SymbolTable;
use crate::token::{Token, TokenKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExprValue<'i> {
    Resolved(i32),
    /// Carries the token (a name) that could not be resolved, the
    /// deferral cause recorded in a backpatch entry.
    Deferred(Token<'i>),
}

fn parse_int_literal<'i>(token: Token<'i>, base: Base) -> Result<'i, i32> {
    i32::from_str_radix(token.lexeme, base.radix()).map_err(|_| Error::Syntax {
        location: token.location,
        expected: &[TokenKind::Integer],
        found: TokenKind::Integer,
    })
}

/// A term is one of: a name, an integer literal, or `.`.
fn parse_term<'i>(
    lexer: &mut Lexer<'i>,
    base: Base,
    addr: u32,
    symtab: &SymbolTable<'i>,
) -> Result<'i, ExprValue<'i>> {
    let token = lexer.next()?;
    match token.kind {
        TokenKind::Name => match symtab.lookup(token.lexeme) {
            Some(v) => Ok(ExprValue::Resolved(v as i32)),
            None => Ok(ExprValue::Deferred(token)),
        },
        TokenKind::Integer => Ok(ExprValue::Resolved(parse_int_literal(token, base)?)),
        TokenKind::Dot => Ok(ExprValue::Resolved(addr as i32)),
        other => Err(Error::Syntax {
            location: token.location,
            expected: &[TokenKind::Name, TokenKind::Integer, TokenKind::Dot],
            found: other,
        }),
    }
}

/// Parses `term (('+' | '-') term)*`, stopping at the first non-additive
/// token (which is left unconsumed, belonging to the next statement).
///
/// If any term is unresolved, the whole expression becomes
/// [`ExprValue::Deferred`], carrying the *first* unresolved term's token as
/// the deferral cause. Further `+`/`-` operators are still consumed (so the
/// lexer ends up positioned correctly for whatever follows), but once the
/// expression is known to be deferred, later terms no longer affect the
/// (unused) running total.
pub fn parse_expr<'i>(
    lexer: &mut Lexer<'i>,
    base: Base,
    addr: u32,
    symtab: &SymbolTable<'i>,
) -> Result<'i, ExprValue<'i>> {
    let first = parse_term(lexer, base, addr, symtab)?;
    let mut cause = None;
    let mut acc = match first {
        ExprValue::Resolved(v) => v,
        ExprValue::Deferred(tok) => {
            cause = Some(tok);
            0
        }
    };

    while lexer.peek()?.is_additive_op() {
        let op = lexer.next()?;
        let term = parse_term(lexer, base, addr, symtab)?;
        match term {
            ExprValue::Resolved(v) if cause.is_none() => {
                acc = match op.kind {
                    TokenKind::Plus => acc + v,
                    TokenKind::Minus => acc - v,
                    _ => unreachable!("is_additive_op guarantees +/-"),
                };
            }
            ExprValue::Resolved(_) => {
                // Expression already deferred; consume but ignore.
            }
            ExprValue::Deferred(tok) => {
                if cause.is_none() {
                    cause = Some(tok);
                }
            }
        }
    }

    Ok(match cause {
        Some(tok) => ExprValue::Deferred(tok),
        None => ExprValue::Resolved(acc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<'i>(src: &'i str, symtab: &SymbolTable<'i>) -> Result<'i, ExprValue<'i>> {
        let mut lex = Lexer::new(src, "t");
        parse_expr(&mut lex, Base::Oct, 0o200, symtab)
    }

    #[test]
    fn bare_integer() {
        let symtab = SymbolTable::new();
        assert_eq!(run("10", &symtab).unwrap(), ExprValue::Resolved(0o10));
    }

    #[test]
    fn dot_is_current_address() {
        let symtab = SymbolTable::new();
        assert_eq!(run(".", &symtab).unwrap(), ExprValue::Resolved(0o200));
    }

    #[test]
    fn resolved_name_plus_integer() {
        let mut symtab = SymbolTable::new();
        symtab.define("BASE", 0o10);
        assert_eq!(run("BASE + 5", &symtab).unwrap(), ExprValue::Resolved(0o10 + 5));
    }

    #[test]
    fn subtraction_is_left_to_right() {
        let symtab = SymbolTable::new();
        assert_eq!(run("10 - 3 - 2", &symtab).unwrap(), ExprValue::Resolved(0o10 - 3 - 2));
    }

    #[test]
    fn unresolved_name_defers_whole_expression() {
        let symtab = SymbolTable::new();
        match run("UNKNOWN + 1", &symtab).unwrap() {
            ExprValue::Deferred(tok) => assert_eq!(tok.lexeme, "UNKNOWN"),
            other => panic!("expected Deferred, got {:?}", other),
        }
    }

    #[test]
    fn stops_before_non_additive_token() {
        let symtab = SymbolTable::new();
        let mut lex = Lexer::new("10 , 20", "t");
        let v = parse_expr(&mut lex, Base::Oct, 0, &symtab).unwrap();
        assert_eq!(v, ExprValue::Resolved(0o10));
        // the comma is still there, unconsumed
        assert_eq!(lex.next().unwrap().kind, TokenKind::Comma);
    }

    #[test]
    fn decimal_base_changes_literal_interpretation() {
        let symtab = SymbolTable::new();
        let mut lex = Lexer::new("10", "t");
        let v = parse_expr(&mut lex, Base::Dec, 0, &symtab).unwrap();
        assert_eq!(v, ExprValue::Resolved(10));
    }
}
