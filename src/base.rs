//! The radix governing how unadorned integer literals are interpreted.

/// Current numeric base. Initial value is [`Base::Oct`]; changed by the
/// pseudo-directives `DECIMAL` and `OCTAL`.
///
/// Hexadecimal and binary bases are enumerated by the reference
/// implementation but never wired up; this dialect only ever supports two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Base {
    Oct,
    Dec,
}

impl Base {
    pub fn radix(self) -> u32 {
        match self {
            Base::Oct => 8,
            Base::Dec => 10,
        }
    }
}

impl Default for Base {
    fn default() -> Base {
        Base::Oct
    }
}
