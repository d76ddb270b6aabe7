//! trade-api-client: HTTP client for the trade API
//!
//! This crate provides the [`TradeApi`] trait the trade board submits through,
//! plus a `reqwest`-backed implementation with bounded request times.

pub mod api;

use std::time::Duration;

use serde::de::DeserializeOwned;
use tradeboard_core::{
    ApiClientError, ApiConfig, ApiResponse, CounterOfferRequest, CreateTradeRequest,
    HistoryQuery, TradeId, TradeRecord,
};

pub use api::TradeApi;

/// Result type for trade API operations
pub type Result<T> = std::result::Result<T, ApiClientError>;

/// Longest slice of an unparseable error body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP trade API client
#[derive(Clone)]
pub struct TradeClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl TradeClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("tradeboard")
            .build()
            .map_err(|e| ApiClientError::Unreachable {
                url: format!("{}: {}", config.url, e),
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        tracing::debug!(method, path, "Trade API request");

        let url = self.endpoint(path);
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let response = timed_request(timeout, request.send())
            .await?
            .map_err(|e| map_transport_error(&url, e, self.config.timeout_secs))?;

        let status = response.status().as_u16();
        let body = timed_request(timeout, response.text())
            .await?
            .map_err(|e| ApiClientError::Parse(format!("Failed to read response: {}", e)))?;

        let result = decode_response(status, &body);
        if let Err(e) = &result {
            tracing::warn!(method, path, status, "Trade API call failed: {}", e);
        }
        result
    }
}

impl TradeApi for TradeClient {
    async fn create_trade(&self, request: &CreateTradeRequest) -> Result<TradeRecord> {
        let path = "/trades";
        let builder = self.http.post(self.endpoint(path)).json(request);
        self.send("POST", path, builder).await
    }

    async fn counter_offer(
        &self,
        trade_id: &TradeId,
        request: &CounterOfferRequest,
    ) -> Result<TradeRecord> {
        let path = format!("/trades/{}", trade_id);
        let builder = self.http.put(self.endpoint(&path)).json(request);
        self.send("PUT", &path, builder).await
    }

    async fn list_trades(&self, query: &HistoryQuery) -> Result<Vec<TradeRecord>> {
        let path = "/trades";
        let builder = self.http.get(self.endpoint(path)).query(query);
        self.send("GET", path, builder).await
    }
}

/// Decode a trade API body into its payload.
///
/// The envelope is honoured whatever the HTTP status, so a 4xx carrying
/// `{success:false, error}` surfaces the server's message. Bodies that are
/// not an envelope become [`ApiClientError::Http`] on error statuses.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    let is_success = (200..300).contains(&status);

    match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) if is_success || !envelope.success => envelope.into_result(),
        Ok(_) => Err(ApiClientError::Http {
            status,
            message: String::new(),
        }),
        Err(_) if !is_success => Err(ApiClientError::Http {
            status,
            message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }),
        Err(e) => Err(ApiClientError::Parse(e.to_string())),
    }
}

fn map_transport_error(url: &str, e: reqwest::Error, timeout_secs: u64) -> ApiClientError {
    if e.is_timeout() {
        ApiClientError::Timeout { secs: timeout_secs }
    } else {
        ApiClientError::Unreachable {
            url: format!("{}: {}", url, e),
        }
    }
}

async fn timed_request<T>(
    timeout: Duration,
    fut: impl std::future::Future<Output = T>,
) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| ApiClientError::Timeout {
            secs: timeout.as_secs(),
        })
}
