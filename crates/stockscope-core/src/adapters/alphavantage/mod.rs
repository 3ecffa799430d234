mod payload;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::data_source::{FetchError, FetchErrorKind, SeriesSource};
use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::throttling::QuotaGuard;
use crate::{StockSeries, Symbol};

pub use payload::{
    EMPTY_SERIES_MESSAGE, MISSING_METADATA_MESSAGE, NO_DATA_MESSAGE, RATE_LIMIT_MESSAGE,
};

/// `function` value selecting the daily OHLCV series.
pub const DAILY_SERIES_FUNCTION: &str = "TIME_SERIES_DAILY";
/// `outputsize` value requesting the full history rather than the latest slice.
pub const FULL_OUTPUT_SIZE: &str = "full";

const API_KEY_PARAM: &str = "apikey";

/// Alpha Vantage daily series fetcher.
///
/// Each call issues exactly one GET with no automatic retry. The adapter keeps
/// no per-call state, so concurrent fetches for any symbols are independent.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    config: ProviderConfig,
    http_client: Arc<dyn HttpClient>,
    quota: Option<QuotaGuard>,
}

impl AlphaVantageAdapter {
    /// Adapter backed by [`ReqwestHttpClient`].
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: ProviderConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let quota = config.quota.map(QuotaGuard::new);
        Self {
            config,
            http_client,
            quota,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn daily_series_request(&self, symbol: &Symbol, api_key: &str) -> HttpRequest {
        HttpRequest::get(self.config.base_url.as_str())
            .with_query("function", DAILY_SERIES_FUNCTION)
            .with_query("symbol", symbol.as_str())
            .with_query(API_KEY_PARAM, api_key)
            .with_query("outputsize", FULL_OUTPUT_SIZE)
            .with_header("accept", "application/json")
            .with_timeout(self.config.timeout)
    }

    async fn fetch_daily_series(&self, symbol: &Symbol) -> Result<StockSeries, FetchError> {
        let api_key = self.config.api_key().ok_or_else(|| {
            FetchError::configuration(
                "missing credential: set STOCKSCOPE_ALPHAVANTAGE_API_KEY or ALPHAVANTAGE_API_KEY",
            )
        })?;

        if self.config.base_url.is_empty() {
            return Err(FetchError::configuration("provider base URL is empty"));
        }

        if let Some(quota) = &self.quota {
            if let Err(wait) = quota.acquire() {
                return Err(FetchError::rate_limited(format!(
                    "local request budget exhausted; retry in {:.0}s",
                    wait.as_secs_f64().ceil()
                )));
            }
        }

        let request = self.daily_series_request(symbol, api_key);
        debug!(
            symbol = symbol.as_str(),
            url = %request.redacted_url(API_KEY_PARAM),
            timeout_ms = request.timeout_ms,
            "requesting daily series"
        );

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(transport_error)?;
        check_status(&response)?;

        let series = payload::decode_daily_series(&response.body)?;
        debug!(
            symbol = series.symbol(),
            points = series.len(),
            last_refreshed = series.last_refreshed(),
            "decoded daily series"
        );
        Ok(series)
    }
}

impl SeriesSource for AlphaVantageAdapter {
    fn fetch_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<StockSeries, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let result = self.fetch_daily_series(symbol).await;
            if let Err(error) = &result {
                match error.kind() {
                    FetchErrorKind::RateLimited | FetchErrorKind::Provider => warn!(
                        symbol = symbol.as_str(),
                        code = error.code(),
                        message = error.message(),
                        "daily series request rejected"
                    ),
                    FetchErrorKind::Configuration | FetchErrorKind::Transport => debug!(
                        symbol = symbol.as_str(),
                        code = error.code(),
                        message = error.message(),
                        "daily series request failed"
                    ),
                }
            }
            result
        })
    }
}

impl std::fmt::Debug for AlphaVantageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageAdapter")
            .field("config", &self.config)
            .field("quota", &self.quota)
            .finish_non_exhaustive()
    }
}

fn transport_error(error: HttpError) -> FetchError {
    if error.is_timeout() {
        FetchError::transport(format!("alphavantage request timed out: {}", error.message()))
    } else {
        FetchError::transport(format!("alphavantage transport error: {}", error.message()))
    }
}

/// The provider answers 200 for in-band conditions; anything else is classified here.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    match response.status {
        _ if response.is_success() => Ok(()),
        401 | 403 => Err(FetchError::configuration(format!(
            "provider rejected the configured credential (status {})",
            response.status
        ))),
        429 => Err(FetchError::rate_limited(RATE_LIMIT_MESSAGE)),
        status => Err(FetchError::transport(format!(
            "alphavantage returned status {status}"
        ))),
    }
}
