//! Encodes a single instruction mnemonic into its 12-bit machine word.
//!
//! Memory-reference instructions (`AND, TAD, ISZ, DCA, JMS, JMP`) consume an
//! optional `I` indirect marker and an address expression, then compose the
//! indirect bit, the page (`Z`) bit, and the low 7 address bits with the
//! mnemonic's opcode. Everything else (operate-group microinstructions, IOT
//! device codes, EAE and floating-point pseudo-ops) stands alone: its
//! opcode *is* the encoded word, ready to be OR-combined with its
//! neighbors on the same line by the driver.

use crate::base::Base;
use crate::error::{Error, Result, SemanticError};
use crate::expr::{parse_expr, ExprValue};
use crate::lexer::Lexer;
use crate::mnemonic::{self, MnemonicKind};
use crate::symtab::SymbolTable;
use crate::token::{Token, TokenKind};

pub const INDIRECT_BIT: u16 = 0o400;
pub const PAGE_BIT: u16 = 0o200;
pub const PAGE_MASK: u32 = 0o177;
pub const PAGE_SIZE: u32 = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoded<'i> {
    Resolved(u16),
    Deferred(Token<'i>),
}

/// Encodes the mnemonic at `instr_token` (already consumed from `lexer`).
/// For a memory-reference mnemonic this also consumes an optional `I`
/// marker and the address expression that follows; for a default-kind
/// mnemonic it consumes nothing further.
pub fn encode<'i>(
    lexer: &mut Lexer<'i>,
    base: Base,
    addr: u32,
    symtab: &SymbolTable<'i>,
    instr_token: Token<'i>,
) -> Result<'i, Encoded<'i>> {
    let mnem = mnemonic::lookup(instr_token.lexeme)
        .expect("lexer only tags a token as Instruction when it matches the mnemonic table");

    match mnem.kind {
        MnemonicKind::Default => Ok(Encoded::Resolved(mnem.opcode)),
        MnemonicKind::MemRef => {
            let mut indirect = false;
            if lexer.peek()?.kind == TokenKind::Name && lexer.peek()?.lexeme == "I" {
                lexer.next()?;
                indirect = true;
            }

            let operand_token = lexer.peek()?;
            let value = parse_expr(lexer, base, addr, symtab)?;

            let target = match value {
                ExprValue::Deferred(tok) => return Ok(Encoded::Deferred(tok)),
                ExprValue::Resolved(v) => (v as i64).rem_euclid(4096) as u32,
            };

            let page_bit = if target >= PAGE_BIT as u32 { PAGE_BIT } else { 0 };

            if page_bit != 0 && !indirect && target / PAGE_SIZE != addr / PAGE_SIZE {
                return Err(Error::from(SemanticError::PageMismatch {
                    location: operand_token.location,
                    name: operand_token.lexeme,
                    target,
                    current: addr,
                }));
            }

            let indirect_bit = if indirect { INDIRECT_BIT } else { 0 };
            let word = mnem.opcode | indirect_bit | page_bit | (target & PAGE_MASK) as u16;
            Ok(Encoded::Resolved(word))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_src<'i>(src: &'i str, addr: u32, symtab: &SymbolTable<'i>) -> Result<'i, Encoded<'i>> {
        let mut lex = Lexer::new(src, "t");
        let instr_token = lex.next().unwrap();
        encode(&mut lex, Base::Oct, addr, symtab, instr_token)
    }

    #[test]
    fn default_mnemonic_is_just_its_opcode() {
        let symtab = SymbolTable::new();
        assert_eq!(encode_src("HLT", 0o200, &symtab).unwrap(), Encoded::Resolved(0o7402));
    }

    #[test]
    fn page_zero_reference() {
        let symtab = SymbolTable::new();
        // TAD 10 -> opcode 0o1000, Z=0, addr bits = 0o10
        assert_eq!(encode_src("TAD 10", 0o200, &symtab).unwrap(), Encoded::Resolved(0o1010));
    }

    #[test]
    fn same_page_reference_sets_z_bit() {
        let mut symtab = SymbolTable::new();
        symtab.define("DATA", 0o201);
        assert_eq!(
            encode_src("TAD DATA", 0o200, &symtab).unwrap(),
            Encoded::Resolved(0o1000 | 0o200 | 0o001)
        );
    }

    #[test]
    fn cross_page_without_indirection_is_fatal() {
        let mut symtab = SymbolTable::new();
        symtab.define("TARGET", 0o400);
        let err = encode_src("TAD TARGET", 0o200, &symtab).unwrap_err();
        match err {
            Error::Semantic(SemanticError::PageMismatch { name, .. }) => assert_eq!(name, "TARGET"),
            other => panic!("expected PageMismatch, got {:?}", other),
        }
    }

    #[test]
    fn cross_page_with_indirection_is_legal() {
        let mut symtab = SymbolTable::new();
        symtab.define("PTR", 0o400);
        assert_eq!(
            encode_src("TAD I PTR", 0o200, &symtab).unwrap(),
            Encoded::Resolved(0o1000 | INDIRECT_BIT | PAGE_BIT | ((0o400u32 & PAGE_MASK) as u16))
        );
    }

    #[test]
    fn unresolved_operand_defers() {
        let symtab = SymbolTable::new();
        match encode_src("JMP LATER", 0o200, &symtab).unwrap() {
            Encoded::Deferred(tok) => assert_eq!(tok.lexeme, "LATER"),
            other => panic!("expected Deferred, got {:?}", other),
        }
    }
}
