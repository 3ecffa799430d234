//! Wire decoding for the provider's daily time-series response.
//!
//! The provider keys its fields with an ordinal prefix (`"1. open"`,
//! `"2. Symbol"`). Fields are matched on their label after that prefix, so a
//! renumbering upstream only touches this module.

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::{Map, Value};

use crate::data_source::FetchError;
use crate::{DailyBar, StockSeries, TradingDate, ValidationError};

const ERROR_MESSAGE_KEY: &str = "Error Message";
const NOTE_KEY: &str = "Note";
const INFORMATION_KEY: &str = "Information";
const TIME_SERIES_PREFIX: &str = "Time Series";
const META_DATA_KEY: &str = "Meta Data";

/// Wording the provider uses when an `Information` notice is a throttle.
const THROTTLE_WORDING: [&str; 4] = ["rate limit", "call frequency", "requests per", "calls per"];

pub const RATE_LIMIT_MESSAGE: &str = "call frequency limit reached; retry later";
pub const NO_DATA_MESSAGE: &str = "invalid symbol or no data available";
pub const EMPTY_SERIES_MESSAGE: &str = "time series contains no data points";
pub const MISSING_METADATA_MESSAGE: &str = "missing metadata";

/// Top-level shape of a decoded response, in priority order.
#[derive(Debug)]
enum ResponseShape<'a> {
    ProviderError(String),
    ThrottleNotice(&'a Value),
    Missing { notice: Option<String> },
    Series {
        key: &'a str,
        points: &'a Value,
        meta: Option<&'a Value>,
    },
}

impl<'a> ResponseShape<'a> {
    fn classify(body: &'a Map<String, Value>) -> Self {
        if let Some(message) = body.get(ERROR_MESSAGE_KEY) {
            return Self::ProviderError(text_of(message));
        }

        if let Some(note) = body.get(NOTE_KEY) {
            return Self::ThrottleNotice(note);
        }

        let information = body.get(INFORMATION_KEY);
        if let Some(notice) = information.filter(|notice| mentions_throttling(&text_of(notice))) {
            return Self::ThrottleNotice(notice);
        }

        match body
            .iter()
            .find(|(key, _)| key.starts_with(TIME_SERIES_PREFIX))
        {
            Some((key, points)) => Self::Series {
                key,
                points,
                meta: body.get(META_DATA_KEY),
            },
            // Any other `Information` notice explains the missing data better than we can.
            None => Self::Missing {
                notice: information.map(text_of),
            },
        }
    }
}

/// Decodes a raw response body into a [`StockSeries`].
pub(crate) fn decode_daily_series(body: &str) -> Result<StockSeries, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|error| {
        FetchError::transport(format!("provider returned a non-JSON body: {error}"))
    })?;

    let Some(object) = value.as_object() else {
        return Err(FetchError::provider(NO_DATA_MESSAGE));
    };

    let (key, points, meta) = match ResponseShape::classify(object) {
        ResponseShape::ProviderError(message) => return Err(FetchError::provider(message)),
        ResponseShape::ThrottleNotice(notice) => {
            tracing::warn!(notice = %text_of(notice), "provider throttling notice");
            return Err(FetchError::rate_limited(RATE_LIMIT_MESSAGE));
        }
        ResponseShape::Missing { notice: Some(notice) } => {
            return Err(FetchError::provider(notice))
        }
        ResponseShape::Missing { notice: None } => {
            return Err(FetchError::provider(NO_DATA_MESSAGE))
        }
        ResponseShape::Series { key, points, meta } => (key, points, meta),
    };

    if !points.is_object() {
        return Err(FetchError::provider("time series payload is not an object"));
    }

    // `Value` keeps only the last of repeated keys, so the records are read
    // again from the raw body with every entry preserved.
    let records = RecordsSeed { series_key: key }
        .deserialize(&mut serde_json::Deserializer::from_str(body))
        .map_err(|error| FetchError::provider(format!("malformed time series: {error}")))?;
    if records.is_empty() {
        return Err(FetchError::provider(EMPTY_SERIES_MESSAGE));
    }

    let bars = records
        .iter()
        .map(|(date, record)| decode_bar(date, record))
        .collect::<Result<Vec<_>, _>>()?;

    let (symbol, last_refreshed) = decode_metadata(meta)?;

    StockSeries::new(symbol, last_refreshed, bars).map_err(|error| match error {
        ValidationError::DuplicateDate { date } => {
            FetchError::provider(format!("malformed data point: duplicate date {date}"))
        }
        other => FetchError::provider(other.to_string()),
    })
}

fn mentions_throttling(text: &str) -> bool {
    let text = text.to_ascii_lowercase();
    THROTTLE_WORDING.iter().any(|wording| text.contains(wording))
}

/// Collects `(date, record)` pairs under `series_key` in document order,
/// repeated dates included.
struct RecordsSeed<'k> {
    series_key: &'k str,
}

impl<'de> DeserializeSeed<'de> for RecordsSeed<'_> {
    type Value = Vec<(String, Value)>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for RecordsSeed<'_> {
    type Value = Vec<(String, Value)>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a response object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut records = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            if key == self.series_key {
                records = map.next_value_seed(RecordEntries)?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(records)
    }
}

struct RecordEntries;

impl<'de> DeserializeSeed<'de> for RecordEntries {
    type Value = Vec<(String, Value)>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for RecordEntries {
    type Value = Vec<(String, Value)>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object of dated records")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

fn decode_bar(date: &str, record: &Value) -> Result<DailyBar, FetchError> {
    let malformed =
        |detail: String| FetchError::provider(format!("malformed data point for {date}: {detail}"));

    let fields = record
        .as_object()
        .ok_or_else(|| malformed(String::from("record is not an object")))?;
    let date = TradingDate::parse(date).map_err(|error| malformed(error.to_string()))?;

    let price = |label: &str| -> Result<f64, FetchError> {
        let raw = field(fields, label).ok_or_else(|| malformed(format!("missing '{label}'")))?;
        parse_price(raw).ok_or_else(|| malformed(format!("'{label}' is not a number: {raw}")))
    };

    let open = price("open")?;
    let high = price("high")?;
    let low = price("low")?;
    let close = price("close")?;

    let raw_volume =
        field(fields, "volume").ok_or_else(|| malformed(String::from("missing 'volume'")))?;
    let volume = parse_volume(raw_volume).ok_or_else(|| {
        malformed(format!("'volume' is not a non-negative integer: {raw_volume}"))
    })?;

    DailyBar::new(date, open, high, low, close, volume).map_err(|error| malformed(error.to_string()))
}

fn decode_metadata(meta: Option<&Value>) -> Result<(String, String), FetchError> {
    let missing = || FetchError::provider(MISSING_METADATA_MESSAGE);
    let fields = meta.and_then(Value::as_object).ok_or_else(missing)?;

    let symbol = field(fields, "symbol")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(missing)?;
    let last_refreshed = field(fields, "last refreshed")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(missing)?;

    Ok((symbol.to_owned(), last_refreshed.to_owned()))
}

/// Finds the value whose key label (ordinal prefix removed) equals `label`.
fn field<'a>(fields: &'a Map<String, Value>, label: &str) -> Option<&'a Value> {
    fields
        .iter()
        .find(|(key, _)| field_label(key).eq_ignore_ascii_case(label))
        .map(|(_, value)| value)
}

/// `"1. open"` -> `"open"`; keys without an ordinal prefix are returned trimmed.
fn field_label(key: &str) -> &str {
    match key.split_once('.') {
        Some((ordinal, label))
            if !ordinal.trim().is_empty() && ordinal.trim().bytes().all(|b| b.is_ascii_digit()) =>
        {
            label.trim()
        }
        _ => key.trim(),
    }
}

fn parse_price(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Number(number) => number.as_f64()?,
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

fn parse_volume(value: &Value) -> Option<u64> {
    match value {
        Value::String(text) => text.trim().parse::<u64>().ok(),
        Value::Number(number) => number.as_u64(),
        _ => None,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
