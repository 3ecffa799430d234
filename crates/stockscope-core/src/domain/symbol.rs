use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Ticker symbol as typed by the caller.
///
/// Surrounding whitespace is trimmed but case is preserved; the provider is
/// case-insensitive and echoes its own canonical form in the series metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let len = trimmed.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        for (index, ch) in trimmed.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_but_preserves_case() {
        let parsed = Symbol::parse("  aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "aapl");
    }

    #[test]
    fn accepts_exchange_suffix() {
        let parsed = Symbol::parse("RELIANCE.BSE").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "RELIANCE.BSE");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Symbol::parse("   "), Err(ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Symbol::parse("AAPL$").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::SymbolInvalidChar { ch: '$', index: 4 }
        ));
    }

    #[test]
    fn rejects_overlong_symbol() {
        let err = Symbol::parse("ABCDEFGHIJKLMNOP").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolTooLong { len: 16, .. }));
    }
}
