//! Assembler for a PAL-style PDP-8 assembly dialect.
//!
//! [`assemble`] turns a source string into a 4,096-word memory image;
//! [`object::write`] serializes that image as a DEC object (BIN) paper
//! tape. The pieces in between (the mnemonic table, lexer, symbol table,
//! backpatch queue, and expression/encoder layers) are exposed as public
//! modules for testing and for callers that want finer-grained control.

pub mod backpatch;
pub mod base;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod mnemonic;
pub mod object;
pub mod symtab;
pub mod token;

pub use driver::assemble;
pub use error::{Error, SemanticError};
pub use object::MEMORY_SIZE;
