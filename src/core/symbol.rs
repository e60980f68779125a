//! Input symbols.

use super::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single alphanumeric input character.
///
/// Symbols are case-insensitive; the stored form is always uppercase, so two
/// symbols compare equal exactly when the user would consider them the same.
///
/// # Example
///
/// ```rust
/// use fsm_designer::core::Symbol;
///
/// let a = Symbol::parse("a").unwrap();
/// assert_eq!(a, Symbol::parse("A").unwrap());
/// assert_eq!(a.as_char(), 'A');
///
/// assert!(Symbol::parse("ab").is_err());
/// assert!(Symbol::parse("$").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Symbol(char);

impl Symbol {
    /// Parse a whitespace-free token into a symbol.
    ///
    /// Length is checked before content so that `"ab"` and `"$"` report
    /// different problems.
    pub fn parse(token: &str) -> Result<Self, ModelError> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| ModelError::InvalidSymbol(token.to_string()))
            }
            _ => Err(ModelError::SymbolLength(token.to_string())),
        }
    }

    /// Canonicalize a character, returning `None` if it is not alphanumeric.
    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_alphanumeric().then(|| Self(c.to_ascii_uppercase()))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Symbol {
    type Error = ModelError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or_else(|| ModelError::InvalidSymbol(c.to_string()))
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
