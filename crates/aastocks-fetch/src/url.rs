//! AAStocks URL construction.

use aastocks_types::PriceFrequency;

/// Base URL of the AAStocks chart data feed.
pub const CHART_DATA_URL: &str = "http://chartdata1.internet.aastocks.com";

/// Base URL of the AAStocks website (quote detail and dividend pages).
pub const QUOTE_URL: &str = "http://www.aastocks.com";

/// Builds the URL of a symbol's quote detail page.
///
/// # Example
///
/// ```
/// use aastocks_fetch::url::{QUOTE_URL, detail_quote_url};
///
/// assert_eq!(
///     detail_quote_url(QUOTE_URL, "00006"),
///     "http://www.aastocks.com/en/stocks/quote/detail-quote.aspx?symbol=00006"
/// );
/// ```
#[must_use]
pub fn detail_quote_url(base_url: &str, symbol: &str) -> String {
    format!(
        "{}/en/stocks/quote/detail-quote.aspx?symbol={symbol}",
        base_url.trim_end_matches('/')
    )
}

/// Builds the URL of a symbol's dividend history page.
#[must_use]
pub fn dividend_url(base_url: &str, symbol: &str) -> String {
    format!(
        "{}/en/stocks/analysis/dividend.aspx?symbol={symbol}",
        base_url.trim_end_matches('/')
    )
}

/// Builds the URL for a symbol's historical price series.
///
/// URL format:
/// `{base}/servlet/iDataServlet/getdaily?id={SYMBOL}.HK&type=24&market=1&level=1&period={CODE}&encoding=utf8`
///
/// # Example
///
/// ```
/// use aastocks_fetch::url::{CHART_DATA_URL, historical_url};
/// use aastocks_types::PriceFrequency;
///
/// let url = historical_url(CHART_DATA_URL, "00006", PriceFrequency::Daily);
/// assert_eq!(
///     url,
///     "http://chartdata1.internet.aastocks.com/servlet/iDataServlet/getdaily?id=00006.HK&type=24&market=1&level=1&period=56&encoding=utf8"
/// );
/// ```
#[must_use]
pub fn historical_url(base_url: &str, symbol: &str, frequency: PriceFrequency) -> String {
    format!(
        "{}/servlet/iDataServlet/getdaily?id={}.HK&type=24&market=1&level=1&period={}&encoding=utf8",
        base_url.trim_end_matches('/'),
        symbol,
        frequency.code()
    )
}
