//! HTTP client for the historical price feed and the quote web pages.

use aastocks_types::{AastocksError, Dividend, PriceFrequency, PriceSeries, QuoteSnapshot};
use bytes::Bytes;
use reqwest::header::REFERER;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::{parse_detail_page, parse_dividend_page, parse_series_bytes, url};

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the chart data feed.
    pub base_url: String,
    /// Base URL of the website serving quote detail and dividend pages.
    pub quote_base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: url::CHART_DATA_URL.to_string(),
            quote_base_url: url::QUOTE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("aastocks/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Sets the base URL of the chart data feed.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the base URL of the quote website.
    #[must_use]
    pub fn with_quote_base_url(mut self, quote_base_url: impl Into<String>) -> Self {
        self.quote_base_url = quote_base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors that can occur while fetching the feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-200 status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },
}

/// HTTP client for the AAStocks chart data feed.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    config: ClientConfig,
}

impl FeedClient {
    /// Creates a new feed client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads the raw wire-format body for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not 200.
    pub async fn fetch_raw(
        &self,
        symbol: &str,
        frequency: PriceFrequency,
    ) -> Result<Bytes, FeedError> {
        let url = url::historical_url(&self.config.base_url, symbol, frequency);
        debug!(%symbol, %frequency, %url, "fetching historical prices");
        self.get(&url).await
    }

    /// Fetches and extracts a symbol's quote detail page.
    ///
    /// # Errors
    ///
    /// Returns [`AastocksError::Source`] carrying
    /// [`SourceError::NotFound`](aastocks_types::SourceError::NotFound) for an
    /// unknown symbol, [`AastocksError::Http`] if the download fails and
    /// [`AastocksError::Parse`] if the page cannot be read.
    pub async fn quote_detail(&self, symbol: &str) -> aastocks_types::Result<QuoteSnapshot> {
        let url = url::detail_quote_url(&self.config.quote_base_url, symbol);
        debug!(%symbol, %url, "fetching quote detail");
        let body = self
            .get(&url)
            .await
            .map_err(|e| AastocksError::Http(e.to_string()))?;

        let symbol = symbol.to_string();
        tokio::task::spawn_blocking(move || {
            parse_detail_page(&symbol, &String::from_utf8_lossy(&body))
        })
        .await
        .map_err(|e| AastocksError::Parse(format!("spawn_blocking failed: {e}")))?
        .map_err(AastocksError::from)
    }

    /// Fetches and extracts a symbol's dividend history.
    ///
    /// # Errors
    ///
    /// Returns [`AastocksError::Http`] if the download fails and
    /// [`AastocksError::Parse`] if the table cannot be read.
    pub async fn dividends(&self, symbol: &str) -> aastocks_types::Result<Vec<Dividend>> {
        let url = url::dividend_url(&self.config.quote_base_url, symbol);
        debug!(%symbol, %url, "fetching dividends");
        let body = self
            .get(&url)
            .await
            .map_err(|e| AastocksError::Http(e.to_string()))?;

        tokio::task::spawn_blocking(move || parse_dividend_page(&String::from_utf8_lossy(&body)))
            .await
            .map_err(|e| AastocksError::Parse(format!("spawn_blocking failed: {e}")))?
            .map_err(AastocksError::from)
    }

    /// Issues a GET carrying its own URL as `Referer`, which the provider
    /// checks, and returns the body of a 200 response.
    async fn get(&self, url: &str) -> Result<Bytes, FeedError> {
        let response = self.client.get(url).header(REFERER, url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(FeedError::ServerError {
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }

    /// Downloads and parses a symbol's historical price series.
    ///
    /// Parsing is offloaded to a blocking thread so large daily histories do
    /// not stall the async executor.
    ///
    /// # Errors
    ///
    /// Returns [`AastocksError::Http`] if the download fails and
    /// [`AastocksError::Parse`] if the body is malformed.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        frequency: PriceFrequency,
    ) -> aastocks_types::Result<PriceSeries> {
        let body = self
            .fetch_raw(symbol, frequency)
            .await
            .map_err(|e| AastocksError::Http(e.to_string()))?;

        tokio::task::spawn_blocking(move || parse_series_bytes(&body, frequency))
            .await
            .map_err(|e| AastocksError::Parse(format!("spawn_blocking failed: {e}")))?
            .map_err(|e| AastocksError::Parse(e.to_string()))
    }
}
