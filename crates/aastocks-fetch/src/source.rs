//! Quote sources backed by the quote detail page and the historical feed.

use aastocks_types::{PriceFrequency, QuoteSnapshot, QuoteSource, SourceError};
use async_trait::async_trait;
use chrono::Utc;

use crate::FeedClient;

/// A [`QuoteSource`] that reads a symbol's quote detail page.
///
/// Each refresh yields the full snapshot: last price, provider update time,
/// name, ratios and board lot. An unknown symbol refreshes to
/// [`SourceError::NotFound`].
#[derive(Debug, Clone)]
pub struct DetailQuoteSource {
    client: FeedClient,
    symbol: String,
}

impl DetailQuoteSource {
    /// Creates a source polling the detail page for `symbol`.
    #[must_use]
    pub fn new(client: FeedClient, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for DetailQuoteSource {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    async fn refresh(&mut self) -> Result<QuoteSnapshot, SourceError> {
        Ok(self.client.quote_detail(&self.symbol).await?)
    }
}

/// A [`QuoteSource`] that reads the latest bar of a symbol's intraday feed.
///
/// The snapshot price is the latest bar's close and its time is the bar's
/// timestamp, with bars that were dated into the next year moved back (see
/// [`PriceSeries::latest_as_of`](aastocks_types::PriceSeries::latest_as_of)).
/// Descriptive fields (name, ratios, lots) are left unset; use
/// [`DetailQuoteSource`](crate::DetailQuoteSource) for those.
#[derive(Debug, Clone)]
pub struct FeedQuoteSource {
    client: FeedClient,
    symbol: String,
    frequency: PriceFrequency,
}

impl FeedQuoteSource {
    /// Creates a source polling the hourly feed for `symbol`.
    #[must_use]
    pub fn new(client: FeedClient, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            frequency: PriceFrequency::Hourly,
        }
    }

    /// Polls a different feed frequency.
    #[must_use]
    pub const fn with_frequency(mut self, frequency: PriceFrequency) -> Self {
        self.frequency = frequency;
        self
    }
}

#[async_trait]
impl QuoteSource for FeedQuoteSource {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    async fn refresh(&mut self) -> Result<QuoteSnapshot, SourceError> {
        let series = self
            .client
            .historical_prices(&self.symbol, self.frequency)
            .await?;

        let latest = series
            .latest_as_of(Utc::now())
            .ok_or_else(|| SourceError::not_found(self.symbol.as_str()))?;
        Ok(QuoteSnapshot::new(
            self.symbol.as_str(),
            latest.close,
            latest.timestamp,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use crate::detail::tests::{NOT_FOUND_PAGE, power_assets_page};
    use approx::assert_relative_eq;
    use chrono::TimeDelta;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn detail_source(status: u16, body: &str) -> (MockServer, DetailQuoteSource) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/en/stocks/quote/detail-quote.aspx"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;

        let config = ClientConfig::default().with_quote_base_url(server.uri());
        let client = FeedClient::new(config).unwrap();
        (server, DetailQuoteSource::new(client, "00006"))
    }

    #[tokio::test]
    async fn test_detail_refresh() {
        let (_server, mut source) = detail_source(200, &power_assets_page()).await;

        let snapshot = source.refresh().await.unwrap();
        assert_eq!(source.symbol(), "00006");
        assert_relative_eq!(snapshot.price, 44.65);
        assert_eq!(snapshot.name.as_deref(), Some("POWER ASSETS"));
        assert_relative_eq!(snapshot.pe_ratio.unwrap(), 13.368);
    }

    #[tokio::test]
    async fn test_detail_refresh_unknown_symbol() {
        let (_server, mut source) = detail_source(200, NOT_FOUND_PAGE).await;
        let err = source.refresh().await.unwrap_err();
        assert_eq!(err, SourceError::not_found("00006"));
    }

    #[tokio::test]
    async fn test_detail_refresh_layout_change_is_fetch_failure() {
        let (_server, mut source) = detail_source(200, "<html><body></body></html>").await;
        let err = source.refresh().await.unwrap_err();
        assert!(matches!(err, SourceError::Fetch(ref msg) if msg.contains("Name cannot be found")));
    }

    async fn source_with_body(status: u16, body: &str) -> (MockServer, FeedQuoteSource) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("period", "23"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;

        let client = FeedClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap();
        (server, FeedQuoteSource::new(client, "00006"))
    }

    #[tokio::test]
    async fn test_refresh_uses_latest_bar() {
        let day = (Utc::now() - TimeDelta::days(1)).date_naive();
        let md = day.format("%m/%d");
        let body = format!(
            "POWER ASSETS|44.65|{md};10:00:00;44.5;44.7;44.4;44.6;0;0|{md};11:00:00;44.6;44.8;44.5;44.65;0;0"
        );
        let (_server, mut source) = source_with_body(200, &body).await;

        let snapshot = source.refresh().await.unwrap();
        assert_eq!(snapshot.symbol, "00006");
        assert_relative_eq!(snapshot.price, 44.65);
        assert_eq!(
            snapshot.updated_at,
            day.and_hms_opt(11, 0, 0).unwrap().and_utc()
        );
    }

    #[tokio::test]
    async fn test_refresh_empty_feed_is_not_found() {
        let (_server, mut source) = source_with_body(200, "|").await;
        let err = source.refresh().await.unwrap_err();
        assert_eq!(err, SourceError::not_found("00006"));
    }

    #[tokio::test]
    async fn test_refresh_server_error_is_fetch_failure() {
        let (_server, mut source) = source_with_body(500, "").await;
        let err = source.refresh().await.unwrap_err();
        assert!(matches!(err, SourceError::Fetch(_)));
    }
}
