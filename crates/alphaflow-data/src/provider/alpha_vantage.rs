//! Alpha Vantage REST API 클라이언트.
//!
//! Alpha Vantage의 TIME_SERIES_INTRADAY 엔드포인트에서 장중 시계열 데이터를
//! 조회합니다. 호출당 한 번의 요청만 수행하며 재시도하지 않습니다.
//!
//! # API 키 관리
//!
//! API 키는 환경변수 `API_KEY`에서 로드되어 `SecretString`으로 전달됩니다.
//! 키는 요청 URL 구성 시점에만 노출되며 로그에는 기록되지 않습니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use alphaflow_data::provider::AlphaVantageClient;
//!
//! let client = AlphaVantageClient::new(
//!     "https://www.alphavantage.co/query",
//!     api_key,
//!     10_000,
//! )?;
//! let payload = client.fetch_intraday("IBM", "5min").await?;
//! ```

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

use crate::error::{DataError, Result};

/// Alpha Vantage REST API 클라이언트.
pub struct AlphaVantageClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl AlphaVantageClient {
    /// 새로운 Alpha Vantage 클라이언트 생성.
    ///
    /// # Arguments
    /// * `endpoint` - REST 엔드포인트 URL (예: "https://www.alphavantage.co/query")
    /// * `api_key` - Alpha Vantage API 키
    /// * `timeout_ms` - 요청 타임아웃 (밀리초)
    pub fn new(
        endpoint: impl Into<String>,
        api_key: SecretString,
        timeout_ms: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| DataError::Unknown(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// 장중 시계열 조회 URL 구성.
    ///
    /// 순수 함수입니다. 모든 파라미터 값은 percent-encoding되므로 심볼이나
    /// 키에 포함된 특수 문자가 URL 구조를 깨뜨리지 않습니다.
    pub fn intraday_url(&self, symbol: &str, interval: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", interval),
                ("adjusted", "false"),
                ("apikey", self.api_key.expose_secret()),
            ],
        )
        .map_err(|e| DataError::InvalidUrl(format!("{}: {}", self.endpoint, e)))
    }

    /// 장중 시계열 데이터 조회.
    ///
    /// 단일 시도로 GET 요청을 수행하고, 성공 시 디코딩된 JSON 본문을 그대로
    /// 반환합니다. 비정상 상태 코드는 상태 코드와 상태 텍스트를 포함한
    /// [`DataError::Http`]로 매핑됩니다.
    pub async fn fetch_intraday(&self, symbol: &str, interval: &str) -> Result<Value> {
        let url = self.intraday_url(symbol, interval)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            symbol = symbol,
            interval = interval,
            "API 요청"
        );

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            });
        }

        let payload: Value = response.json().await?;

        tracing::debug!(symbol = symbol, "API 응답 수신 완료");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn test_key() -> SecretString {
        SecretString::from("test-api-key".to_string())
    }

    #[test]
    fn test_intraday_url_params() {
        let client =
            AlphaVantageClient::new("https://example.com/query", test_key(), 10_000).unwrap();
        let url = client.intraday_url("IBM", "5min").unwrap();

        let query = url.query().unwrap();
        assert!(query.contains("function=TIME_SERIES_INTRADAY"));
        assert!(query.contains("symbol=IBM"));
        assert!(query.contains("interval=5min"));
        assert!(query.contains("adjusted=false"));
        assert!(query.contains("apikey=test-api-key"));
    }

    #[test]
    fn test_intraday_url_encodes_special_characters() {
        let client =
            AlphaVantageClient::new("https://example.com/query", test_key(), 10_000).unwrap();
        let url = client.intraday_url("A&B=C", "5min").unwrap();

        // 심볼의 특수 문자가 추가 파라미터로 해석되지 않아야 함
        let query = url.query().unwrap();
        assert!(query.contains("symbol=A%26B%3DC"));
        assert!(!query.contains("symbol=A&B"));
    }

    #[test]
    fn test_intraday_url_invalid_endpoint() {
        let client = AlphaVantageClient::new("not a url", test_key(), 10_000).unwrap();
        assert!(matches!(
            client.intraday_url("IBM", "5min"),
            Err(DataError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_intraday_returns_payload() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (5min)": {"2024-11-01 16:00:00": {"1. open": "210.0"}}
        });
        let mock = server
            .mock("GET", "/query")
            .match_query(Matcher::UrlEncoded("symbol".into(), "IBM".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let endpoint = format!("{}/query", server.url());
        let client = AlphaVantageClient::new(endpoint, test_key(), 10_000).unwrap();
        let payload = client.fetch_intraday("IBM", "5min").await.unwrap();

        assert_eq!(payload, body);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_intraday_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let endpoint = format!("{}/query", server.url());
        let client = AlphaVantageClient::new(endpoint, test_key(), 10_000).unwrap();
        let err = client.fetch_intraday("IBM", "5min").await.unwrap_err();

        match err {
            DataError::Http { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_intraday_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("this is not json")
            .create_async()
            .await;

        let endpoint = format!("{}/query", server.url());
        let client = AlphaVantageClient::new(endpoint, test_key(), 10_000).unwrap();
        let err = client.fetch_intraday("IBM", "5min").await.unwrap_err();

        assert!(matches!(err, DataError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_intraday_connection_error() {
        // 어떤 서버도 리스닝하지 않는 포트
        let client =
            AlphaVantageClient::new("http://127.0.0.1:1/query", test_key(), 10_000).unwrap();
        let err = client.fetch_intraday("IBM", "5min").await.unwrap_err();

        assert!(matches!(err, DataError::Connection(_)));
        assert!(err.is_retryable());
    }
}
