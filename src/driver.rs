//! The statement-level dispatcher: consumes tokens, updates the location
//! counter, writes into the 4,096-word image, defers unresolved statements,
//! and after the first sweep retries every deferred statement exactly once.
//!
//! All mutable assembly state (the memory image, the symbol table, the
//! backpatch queue, and the current base/address) lives on one
//! `Assembler` value that owns it for the duration of assembly, rather
//! than in global variables.

use crate::backpatch::{BackpatchEntry, BackpatchQueue};
use crate::base::Base;
use crate::encoder::{self, Encoded};
use crate::error::{Error, Result, SemanticError};
use crate::expr::{parse_expr, ExprValue};
use crate::lexer::Lexer;
use crate::mnemonic;
use crate::object::MEMORY_SIZE;
use crate::symtab::SymbolTable;
use crate::token::{Token, TokenKind};

/// The default start address, octal 200 (decimal 128).
pub const START_ADDRESS: u32 = 0o200;

pub struct Assembler<'i> {
    image: [u16; MEMORY_SIZE],
    symtab: SymbolTable<'i>,
    backpatch: BackpatchQueue<'i>,
    base: Base,
    addr: u32,
}

impl<'i> Assembler<'i> {
    pub fn new() -> Assembler<'i> {
        Assembler {
            image: [0u16; MEMORY_SIZE],
            symtab: SymbolTable::new(),
            backpatch: BackpatchQueue::new(),
            base: Base::default(),
            addr: START_ADDRESS,
        }
    }

    pub fn image(&self) -> &[u16; MEMORY_SIZE] {
        &self.image
    }

    fn store(&mut self, location: crate::token::Location<'i>, addr: u32, word: u16) -> Result<'i, ()> {
        if addr as usize >= MEMORY_SIZE {
            return Err(Error::from(SemanticError::AddressOutOfRange { location, address: addr }));
        }
        self.image[addr as usize] = word;
        Ok(())
    }

    fn snapshot(&self, lexer: Lexer<'i>, cause: Token<'i>) -> BackpatchEntry<'i> {
        BackpatchEntry { cause, address: self.addr, lexer, base: self.base }
    }

    /// Assembles an entire program: a first sweep over every statement,
    /// then exactly one replay of every entry queued during that sweep.
    /// Deferrals produced *during* replay are hard "undefined name" errors,
    /// reported together after the replay completes.
    pub fn run(&mut self, source: &'i str, file: &'i str) -> Result<'i, ()> {
        let mut lexer = Lexer::new(source, file);
        loop {
            if lexer.peek()?.kind == TokenKind::End {
                break;
            }
            self.statement(&mut lexer)?;
        }

        let first_sweep_count = self.backpatch.len();
        let mut queued_now: Vec<BackpatchEntry<'i>> = self.backpatch.iter().copied().collect();
        let mut idx = 0;
        while idx < first_sweep_count {
            let entry = queued_now[idx];
            idx += 1;
            let mut lexer = entry.lexer;
            self.base = entry.base;
            self.addr = entry.address;
            self.statement(&mut lexer)?;
            // Any entries pushed during this replay are undefined names,
            // not further backpatch candidates.
            while queued_now.len() < self.backpatch.len() {
                queued_now.push(*self.backpatch.iter().nth(queued_now.len()).unwrap());
            }
        }

        let undefined: Vec<_> = queued_now[first_sweep_count..]
            .iter()
            .map(|e| (e.cause.location, e.cause.lexeme))
            .collect();

        self.backpatch.clear();

        if !undefined.is_empty() {
            return Err(Error::from(SemanticError::UndefinedNames(undefined)));
        }

        Ok(())
    }

    /// Consumes one top-level construct, dispatching on the kind of the
    /// next token.
    fn statement(&mut self, lexer: &mut Lexer<'i>) -> Result<'i, ()> {
        let next = lexer.peek()?;
        match next.kind {
            TokenKind::Star => self.star_directive(lexer),
            TokenKind::Instruction => self.instruction_statement(lexer),
            TokenKind::Name => self.name_statement(lexer),
            TokenKind::Integer => {
                let tok = lexer.next()?;
                let value = i32::from_str_radix(tok.lexeme, self.base.radix()).map_err(|_| {
                    Error::Syntax {
                        location: tok.location,
                        expected: &[TokenKind::Integer],
                        found: TokenKind::Integer,
                    }
                })?;
                self.store(tok.location, self.addr, (value as i64).rem_euclid(4096) as u16)?;
                self.addr += 1;
                Ok(())
            }
            TokenKind::Dot => self.data_expression(lexer),
            TokenKind::Minus => self.negated_literal(lexer),
            TokenKind::Character => {
                let tok = lexer.next()?;
                let byte = tok.lexeme.as_bytes()[0];
                self.store(tok.location, self.addr, byte as u16)?;
                self.addr += 1;
                Ok(())
            }
            TokenKind::Newline => {
                lexer.next()?;
                Ok(())
            }
            TokenKind::End => Ok(()),
            TokenKind::Equals | TokenKind::Comma | TokenKind::Plus | TokenKind::Semicolon => {
                let tok = lexer.next()?;
                Err(Error::Syntax {
                    location: tok.location,
                    expected: &[
                        TokenKind::Star,
                        TokenKind::Instruction,
                        TokenKind::Name,
                        TokenKind::Integer,
                        TokenKind::Dot,
                        TokenKind::Minus,
                        TokenKind::Character,
                        TokenKind::Newline,
                    ],
                    found: tok.kind,
                })
            }
        }
    }

    fn star_directive(&mut self, lexer: &mut Lexer<'i>) -> Result<'i, ()> {
        let star = lexer.next()?; // consume `*`
        let value = parse_expr(lexer, self.base, self.addr, &self.symtab)?;
        let addr = match value {
            ExprValue::Resolved(v) if v >= 0 && (v as u32) < MEMORY_SIZE as u32 => v as u32,
            ExprValue::Resolved(v) => {
                return Err(Error::from(SemanticError::AddressOutOfRange {
                    location: star.location,
                    address: v as u32,
                }))
            }
            ExprValue::Deferred(_) => {
                return Err(Error::from(SemanticError::AddressOutOfRange {
                    location: star.location,
                    address: self.addr,
                }))
            }
        };
        self.addr = addr;
        Ok(())
    }

    fn instruction_statement(&mut self, lexer: &mut Lexer<'i>) -> Result<'i, ()> {
        let mnem_token = lexer.peek()?;

        // Mnemonic redefinition: `MNEM = expr`.
        if lexer.peek_n(2)?.kind == TokenKind::Equals {
            let pre = self.snapshot(*lexer, mnem_token);
            let name_token = lexer.next()?;
            lexer.next()?; // `=`
            let value = parse_expr(lexer, self.base, self.addr, &self.symtab)?;
            match value {
                ExprValue::Deferred(cause) => {
                    self.backpatch.push(BackpatchEntry { cause, ..pre });
                }
                ExprValue::Resolved(v) => {
                    let mnem = mnemonic::lookup(name_token.lexeme)
                        .expect("Instruction token always resolves to a mnemonic");
                    if v as i64 != mnem.opcode as i64 {
                        return Err(Error::from(SemanticError::MnemonicRedefined {
                            location: name_token.location,
                            name: name_token.lexeme,
                        }));
                    }
                    // Redefining a mnemonic to its own opcode is a harmless
                    // no-op alias; nothing to record.
                }
            }
            return Ok(());
        }

        let pre = self.snapshot(*lexer, mnem_token);
        let mut combined: u16 = 0;
        let mut deferred_cause = None;

        loop {
            let peeked = lexer.peek()?;
            if peeked.kind == TokenKind::Newline || peeked.kind == TokenKind::End {
                break;
            }
            if peeked.kind != TokenKind::Instruction {
                return Err(Error::Syntax {
                    location: peeked.location,
                    expected: &[TokenKind::Instruction],
                    found: peeked.kind,
                });
            }
            let instr_token = lexer.next()?;
            match encoder::encode(lexer, self.base, self.addr, &self.symtab, instr_token)? {
                Encoded::Resolved(word) => combined |= word,
                Encoded::Deferred(cause) => {
                    deferred_cause.get_or_insert(cause);
                }
            }
        }

        if let Some(cause) = deferred_cause {
            self.backpatch.push(BackpatchEntry { cause, ..pre });
        } else {
            self.store(mnem_token.location, self.addr, combined)?;
        }
        self.addr += 1;
        Ok(())
    }

    fn name_statement(&mut self, lexer: &mut Lexer<'i>) -> Result<'i, ()> {
        let name_token = lexer.peek()?;

        if name_token.lexeme == "DECIMAL" {
            lexer.next()?;
            self.base = Base::Dec;
            return Ok(());
        }
        if name_token.lexeme == "OCTAL" {
            lexer.next()?;
            self.base = Base::Oct;
            return Ok(());
        }
        if name_token.lexeme == "PAGE" {
            lexer.next()?;
            if lexer.peek()?.kind == TokenKind::Integer {
                let n_tok = lexer.next()?;
                let n = i32::from_str_radix(n_tok.lexeme, self.base.radix()).map_err(|_| {
                    Error::Syntax {
                        location: n_tok.location,
                        expected: &[TokenKind::Integer],
                        found: TokenKind::Integer,
                    }
                })?;
                // Literal reference-implementation modulus: 36 * 128 = 4608,
                // which exceeds the 4096-word address space. Preserved
                // bit-for-bit; see DESIGN.md for why this is safe here.
                self.addr = (128 * n).rem_euclid(36 * 128) as u32;
            } else {
                let rounded = (self.addr / 128) * 128;
                self.addr = (rounded + 128) % (36 * 128);
            }
            return Ok(());
        }

        let pre = self.snapshot(*lexer, name_token);
        let name_token = lexer.next()?;

        match lexer.peek()?.kind {
            TokenKind::Equals => {
                lexer.next()?;
                let rhs_kind = lexer.peek()?.kind;
                let value = if rhs_kind == TokenKind::Instruction {
                    let instr_token = lexer.next()?;
                    encoder::encode(lexer, self.base, self.addr, &self.symtab, instr_token)?
                        .into()
                } else {
                    parse_expr(lexer, self.base, self.addr, &self.symtab)?
                };
                match value {
                    ExprValue::Deferred(cause) => {
                        self.backpatch.push(BackpatchEntry { cause, ..pre });
                    }
                    ExprValue::Resolved(v) => {
                        self.symtab.define(name_token.lexeme, (v as i64).rem_euclid(4096) as u16)
                    }
                }
                Ok(())
            }
            TokenKind::Comma => {
                lexer.next()?;
                self.symtab.define(name_token.lexeme, self.addr as u16);
                Ok(())
            }
            _ => {
                // Rewind to before the name and treat the whole construct
                // as a data expression.
                let mut lexer2 = pre.lexer;
                let value = parse_expr(&mut lexer2, self.base, self.addr, &self.symtab)?;
                *lexer = lexer2;
                match value {
                    ExprValue::Deferred(cause) => {
                        self.backpatch.push(BackpatchEntry { cause, ..pre });
                        self.addr += 1;
                    }
                    ExprValue::Resolved(v) => {
                        self.store(name_token.location, self.addr, (v as i64).rem_euclid(4096) as u16)?;
                        self.addr += 1;
                    }
                }
                Ok(())
            }
        }
    }

    fn data_expression(&mut self, lexer: &mut Lexer<'i>) -> Result<'i, ()> {
        let pre = self.snapshot(*lexer, lexer.peek()?);
        let value = parse_expr(lexer, self.base, self.addr, &self.symtab)?;
        match value {
            ExprValue::Deferred(cause) => {
                self.backpatch.push(BackpatchEntry { cause, ..pre });
                self.addr += 1;
            }
            ExprValue::Resolved(v) => {
                self.store(pre.cause.location, self.addr, (v as i64).rem_euclid(4096) as u16)?;
                self.addr += 1;
            }
        }
        Ok(())
    }

    /// A leading `-INT` with an optional `+`/`-` tail:
    /// `(2^12 - v + dv*sign) mod 2^12`.
    fn negated_literal(&mut self, lexer: &mut Lexer<'i>) -> Result<'i, ()> {
        let pre = self.snapshot(*lexer, lexer.peek()?);
        lexer.next()?; // `-`
        let int_token = lexer.next()?;
        if int_token.kind != TokenKind::Integer {
            return Err(Error::Syntax {
                location: int_token.location,
                expected: &[TokenKind::Integer],
                found: int_token.kind,
            });
        }
        let v = i32::from_str_radix(int_token.lexeme, self.base.radix()).map_err(|_| Error::Syntax {
            location: int_token.location,
            expected: &[TokenKind::Integer],
            found: TokenKind::Integer,
        })?;

        let next_kind = lexer.peek()?.kind;
        if next_kind == TokenKind::Plus || next_kind == TokenKind::Minus {
            lexer.next()?; // consume the leading `+`/`-` of the tail
            let sign: i32 = if next_kind == TokenKind::Minus { -1 } else { 1 };
            let tail = parse_expr(lexer, self.base, self.addr, &self.symtab)?;
            match tail {
                ExprValue::Deferred(cause) => {
                    self.backpatch.push(BackpatchEntry { cause, ..pre });
                    self.addr += 1;
                    return Ok(());
                }
                ExprValue::Resolved(dv) => {
                    let word = (4096 - v + dv * sign).rem_euclid(4096) as u16;
                    self.store(pre.cause.location, self.addr, word)?;
                    self.addr += 1;
                    return Ok(());
                }
            }
        }

        let word = (4096i32 - v).rem_euclid(4096) as u16;
        self.store(pre.cause.location, self.addr, word)?;
        self.addr += 1;
        Ok(())
    }
}

impl<'i> Default for Assembler<'i> {
    fn default() -> Self {
        Assembler::new()
    }
}

impl<'i> From<Encoded<'i>> for ExprValue<'i> {
    fn from(e: Encoded<'i>) -> ExprValue<'i> {
        match e {
            Encoded::Resolved(w) => ExprValue::Resolved(w as i32),
            Encoded::Deferred(tok) => ExprValue::Deferred(tok),
        }
    }
}

/// Assembles a complete source program and returns its 4,096-word memory
/// image.
pub fn assemble<'i>(source: &'i str, file: &'i str) -> Result<'i, [u16; MEMORY_SIZE]> {
    let mut asm = Assembler::new();
    asm.run(source, file)?;
    Ok(*asm.image())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble_ok(src: &str) -> [u16; MEMORY_SIZE] {
        assemble(src, "t").unwrap()
    }

    #[test]
    fn minimal_halt() {
        let img = assemble_ok("HLT\n$");
        assert_eq!(img[0o200], 0o7402);
        for (i, &w) in img.iter().enumerate() {
            if i != 0o200 {
                assert_eq!(w, 0, "unexpected nonzero word at {:o}", i);
            }
        }
    }

    #[test]
    fn operate_combination() {
        let img = assemble_ok("CLA CLL\n$");
        assert_eq!(img[0o200], 0o7300);
    }

    #[test]
    fn page_zero_reference() {
        let img = assemble_ok("TAD 10\n$");
        assert_eq!(img[0o200], 0o1010);
    }

    #[test]
    fn same_page_reference_with_label() {
        let img = assemble_ok("*200\nSTART, TAD DATA\nDATA, 5\n$");
        assert_eq!(img[0o200], 0o1201);
        assert_eq!(img[0o201], 5);
    }

    #[test]
    fn forward_reference_resolved_by_backpatch() {
        let img = assemble_ok("*200\nJMP LATER\nLATER, HLT\n$");
        assert_eq!(img[0o200], 0o5201);
        assert_eq!(img[0o201], 0o7402);
    }

    #[test]
    fn cross_page_with_indirection_is_legal() {
        let img = assemble_ok("*200\nTAD I PTR\n*400\nPTR, 0\n$");
        assert_eq!(img[0o200], 0o1000 | 0o400 | 0o200 | 0);
    }

    #[test]
    fn cross_page_without_indirection_is_fatal() {
        let err = assemble("*200\nTAD TARGET\n*400\nTARGET, 0\n$", "t").unwrap_err();
        match err {
            Error::Semantic(SemanticError::PageMismatch { name, .. }) => assert_eq!(name, "TARGET"),
            other => panic!("expected PageMismatch, got {:?}", other),
        }
    }

    #[test]
    fn base_switch() {
        let img = assemble_ok("DECIMAL\n*256\n10\nOCTAL\n10\n$");
        assert_eq!(img[0o400], 10);
        assert_eq!(img[0o401], 0o10);
    }

    #[test]
    fn mnemonic_redefinition_to_same_opcode_is_harmless() {
        assemble("HLT = 7402\nHLT\n$", "t").unwrap();
    }

    #[test]
    fn mnemonic_redefinition_to_different_value_is_fatal() {
        let err = assemble("HLT = 1\n$", "t").unwrap_err();
        assert!(matches!(err, Error::Semantic(SemanticError::MnemonicRedefined { .. })));
    }

    #[test]
    fn undefined_name_after_replay_is_fatal() {
        let err = assemble("JMP NEVERDEFINED\n$", "t").unwrap_err();
        match err {
            Error::Semantic(SemanticError::UndefinedNames(names)) => {
                assert_eq!(names.len(), 1);
                assert_eq!(names[0].1, "NEVERDEFINED");
            }
            other => panic!("expected UndefinedNames, got {:?}", other),
        }
    }

    #[test]
    fn label_comma_binds_current_address() {
        let img = assemble_ok("*300\nHERE,\nJMP HERE\n$");
        assert_eq!(img[0o300], 0o5300);
    }

    #[test]
    fn negated_literal() {
        let img = assemble_ok("-5\n$");
        assert_eq!(img[0o200], (4096 - 5) as u16);
    }

    #[test]
    fn negated_literal_with_additive_tail() {
        let img = assemble_ok("-5+2\n$");
        assert_eq!(img[0o200], (4096 - 5 + 2) as u16);
    }

    #[test]
    fn character_literal_stores_byte_value() {
        let img = assemble_ok("\"A\n$");
        assert_eq!(img[0o200], b'A' as u16);
    }

    #[test]
    fn page_directive_advances_to_next_page_when_no_operand() {
        let img = assemble_ok("*10\nPAGE\nHLT\n$");
        assert_eq!(img[0o200], 0o7402);
    }

    #[test]
    fn page_directive_with_operand_jumps_to_nth_page() {
        let img = assemble_ok("PAGE 3\nHLT\n$");
        assert_eq!(img[3 * 128], 0o7402);
    }
}
