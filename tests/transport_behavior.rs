//! Behavior-driven tests for the real HTTP transport.
//!
//! A throwaway TCP server on localhost plays the provider so the reqwest client,
//! status mapping and timeout handling run end to end.

use std::net::SocketAddr;
use std::time::Duration;

use stockscope_core::{
    AlphaVantageAdapter, FetchError, FetchErrorKind, ProviderConfig, SeriesSource, StockSeries,
    Symbol,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const SECRET: &str = "transport-secret";

const DAILY_BODY: &str = r#"{
    "Meta Data": {"2. Symbol": "IBM", "3. Last Refreshed": "2024-01-03"},
    "Time Series (Daily)": {
        "2024-01-02": {"1. open": "160.0", "2. high": "161.5", "3. low": "159.2", "4. close": "161.1", "5. volume": "4100000"},
        "2024-01-03": {"1. open": "161.0", "2. high": "162.0", "3. low": "160.1", "4. close": "160.4", "5. volume": "3900000"}
    }
}"#;

/// Serves one canned HTTP response, then closes the connection.
async fn serve_once(status_line: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        read_request_head(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    addr
}

/// Accepts a connection and never answers.
async fn serve_silence() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            read_request_head(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
    });

    addr
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut received = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !received.windows(4).any(|window| window == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(read) => received.extend_from_slice(&chunk[..read]),
        }
    }
}

async fn fetch_from(addr: SocketAddr, timeout: Duration) -> Result<StockSeries, FetchError> {
    let config = ProviderConfig::new()
        .with_base_url(format!("http://{addr}/query"))
        .with_api_key(SECRET)
        .with_timeout(timeout);
    let symbol = Symbol::parse("IBM").expect("valid symbol");
    AlphaVantageAdapter::new(config).fetch_series(&symbol).await
}

// =============================================================================
// Transport: Success Path
// =============================================================================

#[tokio::test]
async fn when_server_returns_daily_series_it_is_normalized() {
    // Given: A provider answering with two days
    let addr = serve_once("200 OK", DAILY_BODY).await;

    // When: The series is fetched over HTTP
    let series = fetch_from(addr, Duration::from_secs(5))
        .await
        .expect("fetch should succeed");

    // Then: Both days arrive newest first
    assert_eq!(series.len(), 2);
    assert_eq!(series.latest().date.to_string(), "2024-01-03");
    assert_eq!(series.latest().close, 160.4);
}

// =============================================================================
// Transport: Failures
// =============================================================================

#[tokio::test]
async fn when_server_returns_non_json_transport_error_is_returned() {
    // Given: A provider answering 200 with an HTML page
    let addr = serve_once("200 OK", "<html>maintenance</html>").await;

    // When: The series is fetched
    let error = fetch_from(addr, Duration::from_secs(5))
        .await
        .expect_err("non-JSON must fail");

    // Then: It is classified as transport
    assert_eq!(error.kind(), FetchErrorKind::Transport);
}

#[tokio::test]
async fn when_server_returns_503_transport_error_is_returned() {
    // Given: A provider answering 503
    let addr = serve_once("503 Service Unavailable", "{}").await;

    // When: The series is fetched
    let error = fetch_from(addr, Duration::from_secs(5))
        .await
        .expect_err("503 must fail");

    // Then: It is classified as transport and mentions the status
    assert_eq!(error.kind(), FetchErrorKind::Transport);
    assert!(error.message().contains("503"));
}

#[tokio::test]
async fn when_server_rejects_the_key_configuration_error_is_returned() {
    // Given: A provider answering 403
    let addr = serve_once("403 Forbidden", "{}").await;

    // When: The series is fetched
    let error = fetch_from(addr, Duration::from_secs(5))
        .await
        .expect_err("403 must fail");

    // Then: The caller is told to fix configuration
    assert_eq!(error.kind(), FetchErrorKind::Configuration);
}

#[tokio::test]
async fn when_server_returns_429_rate_limit_error_is_returned() {
    // Given: A provider answering 429
    let addr = serve_once("429 Too Many Requests", "{}").await;

    // When: The series is fetched
    let error = fetch_from(addr, Duration::from_secs(5))
        .await
        .expect_err("429 must fail");

    // Then: The caller is told to wait
    assert_eq!(error.kind(), FetchErrorKind::RateLimited);
}

#[tokio::test]
async fn when_connection_is_refused_transport_error_hides_the_key() {
    // Given: An address nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);

    // When: The series is fetched
    let error = fetch_from(addr, Duration::from_secs(5))
        .await
        .expect_err("refused connection must fail");

    // Then: Transport error without the credential in its text
    assert_eq!(error.kind(), FetchErrorKind::Transport);
    assert!(!error.to_string().contains(SECRET));
}

#[tokio::test]
async fn when_server_never_answers_timeout_is_a_transport_error() {
    // Given: A provider that accepts but never responds
    let addr = serve_silence().await;

    // When: The series is fetched with a short deadline
    let started = std::time::Instant::now();
    let error = fetch_from(addr, Duration::from_millis(200))
        .await
        .expect_err("silent server must time out");

    // Then: The call gives up promptly as a transport timeout
    assert_eq!(error.kind(), FetchErrorKind::Transport);
    assert!(error.message().contains("timed out"));
    assert!(!error.to_string().contains(SECRET));
    assert!(started.elapsed() < Duration::from_secs(5));
}
