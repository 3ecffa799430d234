//! Series source contract and its failure taxonomy.
//!
//! A [`SeriesSource`] turns a [`Symbol`] into a [`StockSeries`] or a
//! [`FetchError`] whose [`FetchErrorKind`] tells the caller what to do next:
//!
//! | Kind | Typical cause | Caller action |
//! |------|---------------|---------------|
//! | [`Configuration`](FetchErrorKind::Configuration) | credential missing or rejected | fix the deployment |
//! | [`Transport`](FetchErrorKind::Transport) | network failure, timeout, non-JSON body | retry manually |
//! | [`RateLimited`](FetchErrorKind::RateLimited) | provider throttling notice | wait, keep the input |
//! | [`Provider`](FetchErrorKind::Provider) | unknown symbol, no data, malformed payload | change the input |
//!
//! No kind is retried inside the source.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockscope_core::{FetchErrorKind, SeriesSource, Symbol};
//!
//! async fn latest_close(source: &dyn SeriesSource, raw: &str) -> Option<f64> {
//!     let symbol = Symbol::parse(raw).ok()?;
//!     match source.fetch_series(&symbol).await {
//!         Ok(series) => Some(series.latest().close),
//!         Err(error) if error.kind() == FetchErrorKind::RateLimited => None,
//!         Err(_) => None,
//!     }
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{StockSeries, Symbol};

/// Fetch failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Configuration,
    Transport,
    RateLimited,
    Provider,
}

impl FetchErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::RateLimited => "rate_limited",
            Self::Provider => "provider",
        }
    }
}

impl Display for FetchErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fetch error surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Configuration, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Transport, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::RateLimited, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Provider, message)
    }

    fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether re-invoking later with the same input can succeed.
    pub const fn retryable(&self) -> bool {
        matches!(
            self.kind,
            FetchErrorKind::Transport | FetchErrorKind::RateLimited
        )
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Configuration => "fetch.configuration",
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::Provider => "fetch.provider",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Source of normalized daily series.
///
/// Implementations must be `Send + Sync`; concurrent calls are independent and
/// the source holds no per-call state between them.
pub trait SeriesSource: Send + Sync {
    /// Fetches the full daily history for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] classified by [`FetchErrorKind`].
    fn fetch_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<StockSeries, FetchError>> + Send + 'a>>;
}
