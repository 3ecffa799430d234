//! Provider configuration injected into the series fetcher.
//!
//! Nothing in the fetch path reads the process environment; callers build a
//! [`ProviderConfig`] (usually through [`ProviderConfig::from_env`]) and hand it
//! to the adapter at construction time.

use std::env;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub const API_KEY_VAR: &str = "STOCKSCOPE_ALPHAVANTAGE_API_KEY";
pub const FALLBACK_API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
pub const BASE_URL_VAR: &str = "STOCKSCOPE_ALPHAVANTAGE_BASE_URL";
pub const TIMEOUT_MS_VAR: &str = "STOCKSCOPE_HTTP_TIMEOUT_MS";

/// Local request budget enforced before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub limit: u32,
    pub window: Duration,
}

impl QuotaPolicy {
    pub const fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }

    /// Five calls per minute, the provider's free-tier allowance.
    pub const fn alphavantage_free_tier() -> Self {
        Self::new(5, Duration::from_secs(60))
    }
}

/// Connection settings for the market-data provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    api_key: Option<String>,
    pub timeout: Duration,
    pub quota: Option<QuotaPolicy>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderConfig {
    /// Defaults with no credential configured.
    pub fn new() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            quota: None,
        }
    }

    /// Reads provider settings from the process environment.
    ///
    /// | Variable | Purpose |
    /// |----------|---------|
    /// | `STOCKSCOPE_ALPHAVANTAGE_API_KEY` (or `ALPHAVANTAGE_API_KEY`) | credential |
    /// | `STOCKSCOPE_ALPHAVANTAGE_BASE_URL` | query endpoint override |
    /// | `STOCKSCOPE_HTTP_TIMEOUT_MS` | request timeout |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(key) = lookup(API_KEY_VAR)
            .filter(|value| !value.trim().is_empty())
            .or_else(|| lookup(FALLBACK_API_KEY_VAR))
        {
            config = config.with_api_key(key);
        }

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|value| !value.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        if let Some(timeout_ms) = lookup(TIMEOUT_MS_VAR)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|value| *value > 0)
        {
            config = config.with_timeout(Duration::from_millis(timeout_ms));
        }

        config
    }

    /// Sets the credential; blank values leave it unset.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let trimmed = api_key.trim();
        self.api_key = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        };
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_quota(mut self, quota: QuotaPolicy) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("quota", &self.quota)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_have_no_credential() {
        let config = ProviderConfig::from_lookup(lookup_from(&[]));
        assert!(!config.has_api_key());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.quota, None);
    }

    #[test]
    fn prefixed_key_wins_over_fallback() {
        let config = ProviderConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "primary"),
            (FALLBACK_API_KEY_VAR, "fallback"),
        ]));
        assert_eq!(config.api_key(), Some("primary"));
    }

    #[test]
    fn blank_prefixed_key_falls_back() {
        let config = ProviderConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "   "),
            (FALLBACK_API_KEY_VAR, "fallback"),
        ]));
        assert_eq!(config.api_key(), Some("fallback"));
    }

    #[test]
    fn whitespace_key_counts_as_missing() {
        let config = ProviderConfig::new().with_api_key("  \t");
        assert!(!config.has_api_key());
    }

    #[test]
    fn reads_base_url_and_timeout_overrides() {
        let config = ProviderConfig::from_lookup(lookup_from(&[
            (BASE_URL_VAR, "http://127.0.0.1:9000/query"),
            (TIMEOUT_MS_VAR, "2500"),
        ]));
        assert_eq!(config.base_url, "http://127.0.0.1:9000/query");
        assert_eq!(config.timeout, Duration::from_millis(2_500));
    }

    #[test]
    fn unparsable_timeout_keeps_default() {
        let config = ProviderConfig::from_lookup(lookup_from(&[(TIMEOUT_MS_VAR, "soon")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn debug_output_never_shows_the_key() {
        let config = ProviderConfig::new().with_api_key("super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
