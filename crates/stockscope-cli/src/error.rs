use stockscope_core::{CoreError, FetchError, FetchErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockscope_core::ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(error) => Self::Validation(error),
            CoreError::Fetch(error) => Self::Fetch(error),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Fetch(error) => match error.kind() {
                FetchErrorKind::Configuration => 3,
                FetchErrorKind::Transport => 6,
                FetchErrorKind::RateLimited => 7,
                FetchErrorKind::Provider => 8,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }

    /// What the user should do about a fetch failure.
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Fetch(error) => Some(match error.kind() {
                FetchErrorKind::Configuration => {
                    "configuration problem: set STOCKSCOPE_ALPHAVANTAGE_API_KEY to a valid key"
                }
                FetchErrorKind::RateLimited => {
                    "rate limited: wait a minute before asking again"
                }
                FetchErrorKind::Provider => {
                    "bad symbol or no data: check the ticker and exchange suffix"
                }
                FetchErrorKind::Transport => {
                    "network problem: check connectivity and try again"
                }
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_kinds_have_distinct_exit_codes() {
        let codes = [
            CliError::from(FetchError::configuration("x")).exit_code(),
            CliError::from(FetchError::transport("x")).exit_code(),
            CliError::from(FetchError::rate_limited("x")).exit_code(),
            CliError::from(FetchError::provider("x")).exit_code(),
        ];
        assert_eq!(codes, [3, 6, 7, 8]);
    }

    #[test]
    fn only_fetch_errors_carry_a_hint() {
        assert!(CliError::from(FetchError::rate_limited("x"))
            .hint()
            .is_some_and(|hint| hint.starts_with("rate limited")));
        assert!(CliError::from(stockscope_core::ValidationError::EmptySymbol)
            .hint()
            .is_none());
    }

    #[test]
    fn core_errors_unwrap_to_their_category() {
        let error = CliError::from(CoreError::from(stockscope_core::ValidationError::ZeroWindow));
        assert_eq!(error.exit_code(), 2);

        let error = CliError::from(CoreError::from(FetchError::provider("no data")));
        assert_eq!(error.exit_code(), 8);
        assert_eq!(error.to_string(), "no data (fetch.provider)");
    }
}
