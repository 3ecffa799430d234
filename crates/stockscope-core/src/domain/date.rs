use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a daily bar, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    /// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // `time::Date` displays as zero-padded YYYY-MM-DD.
        Display::fmt(&self.0, f)
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_iso_date() {
        let parsed = TradingDate::parse("2024-01-03").expect("must parse");
        assert_eq!(parsed.to_string(), "2024-01-03");
    }

    #[test]
    fn orders_chronologically() {
        let earlier = TradingDate::parse("2023-12-29").expect("must parse");
        let later = TradingDate::parse("2024-01-02").expect("must parse");
        assert!(earlier < later);
    }

    #[test]
    fn rejects_timestamps_and_garbage() {
        for input in ["2024-01-03 16:00:00", "03/01/2024", "2024-13-01", ""] {
            let err = TradingDate::parse(input).expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidDate { .. }));
        }
    }

    #[test]
    fn requires_zero_padded_components_and_tolerates_whitespace() {
        assert!(TradingDate::parse("2024-1-3").is_err());
        let padded = TradingDate::parse(" 2024-01-03\n").expect("must parse");
        assert_eq!(padded.to_string(), "2024-01-03");
    }
}
