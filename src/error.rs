//! Diagnostics. Errors partition into three kinds: lexical, syntactic, and
//! semantic. A hand-written `enum Error` with manual `Display`/`From` impls,
//! rather than a derive-macro error crate.

use crate::lexer::LexError;
use crate::token::{Location, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SemanticError<'i> {
    /// A memory-reference target on a different page than the current
    /// address, with indirection absent.
    PageMismatch { location: Location<'i>, name: &'i str, target: u32, current: u32 },
    /// A mnemonic was redefined to a value other than its own opcode.
    MnemonicRedefined { location: Location<'i>, name: &'i str },
    /// A computed store address (or an explicit `*expr`) fell outside
    /// `[0, 4095]`.
    AddressOutOfRange { location: Location<'i>, address: u32 },
    /// Names still unresolved after the single backpatch replay pass.
    UndefinedNames(Vec<(Location<'i>, &'i str)>),
}

impl<'i> std::fmt::Display for SemanticError<'i> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticError::PageMismatch { location, name, target, current } => write!(
                f,
                "{}: `{}` ({:o}) is not on the same page as current address ({:o})",
                location, name, target, current
            ),
            SemanticError::MnemonicRedefined { location, name } => {
                write!(f, "{}: redefining mnemonics is not supported ({})", location, name)
            }
            SemanticError::AddressOutOfRange { location, address } => {
                write!(f, "{}: address {:o} is out of range [0, 7777]", location, address)
            }
            SemanticError::UndefinedNames(names) => {
                for (location, name) in names {
                    writeln!(f, "{}: undefined name `{}`", location, name)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error<'i> {
    Lexical { location: Location<'i>, byte: u8 },
    Syntax { location: Location<'i>, expected: &'static [TokenKind], found: TokenKind },
    Semantic(SemanticError<'i>),
}

impl<'i> std::fmt::Display for Error<'i> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Lexical { location, byte } => {
                write!(f, "{}: unexpected character '{}' (0x{:02x})", location, *byte as char, byte)
            }
            Error::Syntax { location, expected, found } => {
                write!(f, "{}: expected ", location)?;
                for (i, kind) in expected.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{}", kind.display_name())?;
                }
                write!(f, " but found {}", found.display_name())
            }
            Error::Semantic(err) => write!(f, "{}", err),
        }
    }
}

impl<'i> std::error::Error for Error<'i> {}

impl<'i> From<LexError<'i>> for Error<'i> {
    fn from(err: LexError<'i>) -> Error<'i> {
        Error::Lexical { location: err.location, byte: err.byte }
    }
}

impl<'i> From<SemanticError<'i>> for Error<'i> {
    fn from(err: SemanticError<'i>) -> Error<'i> {
        Error::Semantic(err)
    }
}

pub type Result<'i, T> = std::result::Result<T, Error<'i>>;
