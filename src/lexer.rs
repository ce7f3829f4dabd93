//! A stateful cursor over a source buffer producing a lazy sequence of
//! tokens with source locations.
//!
//! A [`Lexer`] is small and `Copy`: it holds nothing but a borrowed slice of
//! the remaining input and the current [`Location`]. `peek`/`peek_n` clone
//! the cursor rather than consuming it, and a [`BackpatchEntry`]
//! (`crate::backpatch`) snapshots one by value; nothing is shared with the
//! live lexer after the snapshot is taken, so resuming assembly of a
//! deferred statement later is just a matter of restoring a stored copy.

use crate::mnemonic;
use crate::token::{Location, Token, TokenKind};

#[derive(Clone, Copy, Debug)]
pub struct Lexer<'i> {
    rest: &'i str,
    location: Location<'i>,
}

/// A lexical error: an unrecognized byte at a given location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexError<'i> {
    pub location: Location<'i>,
    pub byte: u8,
}

impl<'i> Lexer<'i> {
    pub fn new(source: &'i str, file: &'i str) -> Lexer<'i> {
        Lexer { rest: source, location: Location::start(file) }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.rest.as_bytes().first().copied()
    }

    fn advance(&mut self) {
        let b = self.rest.as_bytes()[0];
        self.rest = &self.rest[1..];
        if b == b'\n' {
            self.location.line += 1;
            self.location.col = 1;
        } else {
            self.location.col += 1;
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token<'i> {
        let location = self.location;
        let lexeme = &self.rest[..1];
        self.advance();
        Token { kind, lexeme, location }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            if b == b' ' || b == b'\t' || b == b'\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        // A `/` begins a comment that extends to the next newline; the
        // newline itself is not consumed by the comment.
        while let Some(b) = self.peek_byte() {
            if b == b'\n' {
                break;
            }
            self.advance();
        }
    }

    /// Advance over leading whitespace and comments, then emit the next
    /// token, including the token's own start location.
    pub fn next(&mut self) -> Result<Token<'i>, LexError<'i>> {
        loop {
            self.skip_whitespace();
            match self.peek_byte() {
                Some(b'/') => {
                    self.advance();
                    self.skip_comment();
                }
                _ => break,
            }
        }

        let location = self.location;
        let b = match self.peek_byte() {
            None => {
                return Ok(Token { kind: TokenKind::End, lexeme: "", location });
            }
            Some(b) => b,
        };

        match b {
            b'$' => Ok(Token { kind: TokenKind::End, lexeme: "", location }),
            b'*' => Ok(self.single(TokenKind::Star)),
            b'=' => Ok(self.single(TokenKind::Equals)),
            b',' => Ok(self.single(TokenKind::Comma)),
            b'.' => Ok(self.single(TokenKind::Dot)),
            b'-' => Ok(self.single(TokenKind::Minus)),
            b'+' => Ok(self.single(TokenKind::Plus)),
            b';' => Ok(self.single(TokenKind::Semicolon)),
            b'\n' => Ok(self.single(TokenKind::Newline)),
            b'"' => {
                // Exactly one following byte is captured as the character's
                // value; the two-byte sequence is consumed as a unit.
                if self.rest.len() < 2 {
                    self.advance();
                    return Err(LexError { location, byte: b });
                }
                let lexeme = &self.rest[1..2];
                self.advance();
                self.advance();
                Ok(Token { kind: TokenKind::Character, lexeme, location })
            }
            b'0'..=b'9' => {
                let len = self.alnum_run_len();
                let lexeme = self.consume(len);
                Ok(Token { kind: TokenKind::Integer, lexeme, location })
            }
            _ if b.is_ascii_alphanumeric() => {
                let len = self.alnum_run_len();
                let lexeme = self.consume(len);
                let kind = if mnemonic::lookup(lexeme).is_some() {
                    TokenKind::Instruction
                } else {
                    TokenKind::Name
                };
                Ok(Token { kind, lexeme, location })
            }
            other => {
                self.advance();
                Err(LexError { location, byte: other })
            }
        }
    }

    fn alnum_run_len(&self) -> usize {
        self.rest
            .as_bytes()
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count()
    }

    fn consume(&mut self, len: usize) -> &'i str {
        let (taken, rest) = self.rest.split_at(len);
        self.rest = rest;
        self.location.col += len as u32;
        taken
    }

    /// Look at the next token without consuming it.
    pub fn peek(&self) -> Result<Token<'i>, LexError<'i>> {
        self.clone().next()
    }

    /// Look `n` tokens ahead (`n >= 1`) without consuming any.
    pub fn peek_n(&self, n: usize) -> Result<Token<'i>, LexError<'i>> {
        debug_assert!(n >= 1);
        let mut cursor = *self;
        let mut tok = cursor.next()?;
        for _ in 1..n {
            tok = cursor.next()?;
        }
        Ok(tok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<TokenKind> {
        let mut lex = Lexer::new(src, "test");
        let mut kinds = Vec::new();
        loop {
            let t = lex.next().unwrap();
            kinds.push(t.kind);
            if t.kind == TokenKind::End {
                break;
            }
        }
        kinds
    }

    #[test]
    fn single_char_tokens() {
        assert_eq!(
            tokens("= , . - + ;\n"),
            vec![
                TokenKind::Equals,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Newline,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn comment_extends_to_newline_but_does_not_consume_it() {
        let mut lex = Lexer::new("/ comment here\nHLT", "t");
        let t = lex.next().unwrap();
        assert_eq!(t.kind, TokenKind::Newline);
        let t = lex.next().unwrap();
        assert_eq!(t.kind, TokenKind::Instruction);
        assert_eq!(t.lexeme, "HLT");
    }

    #[test]
    fn dollar_ends_assembly_without_advancing() {
        let mut lex = Lexer::new("HLT\n$ trailing junk", "t");
        assert_eq!(lex.next().unwrap().kind, TokenKind::Instruction);
        assert_eq!(lex.next().unwrap().kind, TokenKind::Newline);
        let t = lex.next().unwrap();
        assert_eq!(t.kind, TokenKind::End);
    }

    #[test]
    fn instruction_vs_name() {
        let mut lex = Lexer::new("HLT START", "t");
        let t1 = lex.next().unwrap();
        assert_eq!(t1.kind, TokenKind::Instruction);
        let t2 = lex.next().unwrap();
        assert_eq!(t2.kind, TokenKind::Name);
        assert_eq!(t2.lexeme, "START");
    }

    #[test]
    fn character_literal_is_two_bytes() {
        let mut lex = Lexer::new("\"c REST", "t");
        let t = lex.next().unwrap();
        assert_eq!(t.kind, TokenKind::Character);
        assert_eq!(t.lexeme, "c");
        let t2 = lex.next().unwrap();
        assert_eq!(t2.lexeme, "REST");
    }

    #[test]
    fn integer_literal_is_longest_alnum_run() {
        let mut lex = Lexer::new("1234a5", "t");
        let t = lex.next().unwrap();
        assert_eq!(t.kind, TokenKind::Integer);
        assert_eq!(t.lexeme, "1234a5");
    }

    #[test]
    fn peek_does_not_advance() {
        let lex = Lexer::new("TAD 5", "t");
        let p1 = lex.peek().unwrap();
        let p2 = lex.peek().unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn peek_n_looks_ahead_without_consuming() {
        let lex = Lexer::new("TAD 5", "t");
        let second = lex.peek_n(2).unwrap();
        assert_eq!(second.kind, TokenKind::Integer);
        // lexer itself is untouched
        let mut lex2 = lex;
        assert_eq!(lex2.next().unwrap().kind, TokenKind::Instruction);
    }

    #[test]
    fn unexpected_byte_is_lex_error() {
        let mut lex = Lexer::new("%", "t");
        let err = lex.next().unwrap_err();
        assert_eq!(err.byte, b'%');
    }

    #[test]
    fn line_and_column_tracking() {
        let mut lex = Lexer::new("A\nB", "t");
        let t1 = lex.next().unwrap();
        assert_eq!((t1.location.line, t1.location.col), (1, 1));
        let nl = lex.next().unwrap();
        assert_eq!(nl.kind, TokenKind::Newline);
        let t2 = lex.next().unwrap();
        assert_eq!((t2.location.line, t2.location.col), (2, 1));
    }
}
