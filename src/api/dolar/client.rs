use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::models::ApiError;
use crate::api::QuoteSource;
use crate::models::{DolarQuote, HistoricalQuote};

/// Client for dolarapi.com (current quotes) and argentinadatos.com (history)
pub struct DolarApiClient {
    http_client: HttpClient,
    dolar_base_url: String,
    historical_base_url: String,
}

impl DolarApiClient {
    pub const DEFAULT_DOLAR_URL: &'static str = "https://dolarapi.com/v1/dolares";
    pub const DEFAULT_HISTORICAL_URL: &'static str =
        "https://api.argentinadatos.com/v1/cotizaciones/dolares";

    /// Create a client against the public endpoints
    pub fn new() -> Self {
        Self::with_base_urls(
            Self::DEFAULT_DOLAR_URL.to_string(),
            Self::DEFAULT_HISTORICAL_URL.to_string(),
        )
    }

    /// Create a client with custom base URLs (config overrides, tests)
    pub fn with_base_urls(dolar_base_url: String, historical_base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            dolar_base_url: dolar_base_url.trim_end_matches('/').to_string(),
            historical_base_url: historical_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dolar_url(&self, casa: &str) -> String {
        format!("{}/{}", self.dolar_base_url, casa)
    }

    pub fn historical_url(&self, casa: &str) -> String {
        format!("{}/{}", self.historical_base_url, casa)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);

        let response = self.http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(ApiError::HttpError(status.as_u16(), body));
        }

        serde_json::from_str::<T>(&body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /v1/dolares/{casa}
    ///
    /// Current buy/sell quote for one market.
    pub async fn get_dolar_value(&self, casa: &str) -> Result<DolarQuote, ApiError> {
        self.get_json(&self.dolar_url(casa)).await
    }

    /// GET /v1/cotizaciones/dolares/{casa}
    ///
    /// Full daily history for one market, in whatever order the server sends it.
    pub async fn get_historical_dolar_value(
        &self,
        casa: &str,
    ) -> Result<Vec<HistoricalQuote>, ApiError> {
        self.get_json(&self.historical_url(casa)).await
    }
}

impl Default for DolarApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Single best-effort attempt per call. Failures are logged and come back as `None`.
#[async_trait]
impl QuoteSource for DolarApiClient {
    async fn fetch_dolar_value(&self, casa: &str) -> Option<DolarQuote> {
        match self.get_dolar_value(casa).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                error!("Failed to fetch dolar '{}': {}", casa, e);
                None
            }
        }
    }

    async fn fetch_historical_dolar_value(&self, casa: &str) -> Option<Vec<HistoricalQuote>> {
        match self.get_historical_dolar_value(casa).await {
            Ok(history) => Some(history),
            Err(e) => {
                error!("Failed to fetch historical dolar '{}': {}", casa, e);
                None
            }
        }
    }
}
