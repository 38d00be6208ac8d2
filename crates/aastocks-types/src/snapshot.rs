//! Point-in-time quote readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single quote reading for one symbol.
///
/// Snapshots are produced by a [`QuoteSource`](crate::QuoteSource) refresh
/// and replaced wholesale by the next one; they are never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Provider symbol (e.g. `00006`).
    pub symbol: String,
    /// Last traded price.
    pub price: f64,
    /// Provider time the price was valid at (UTC).
    pub updated_at: DateTime<Utc>,
    /// Company name.
    pub name: Option<String>,
    /// Dividend yield as a fraction (0.06 for 6%).
    pub yield_ratio: Option<f64>,
    /// Price-to-earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Price-to-book ratio.
    pub pb_ratio: Option<f64>,
    /// Earnings per share.
    pub eps: Option<f64>,
    /// Board lot size.
    pub lots: Option<u32>,
}

impl QuoteSnapshot {
    /// Creates a snapshot with only the price fields set.
    #[must_use]
    pub fn new(symbol: impl Into<String>, price: f64, updated_at: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            updated_at,
            name: None,
            yield_ratio: None,
            pe_ratio: None,
            pb_ratio: None,
            eps: None,
            lots: None,
        }
    }

    /// Sets the company name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the board lot size.
    #[must_use]
    pub const fn with_lots(mut self, lots: u32) -> Self {
        self.lots = Some(lots);
        self
    }

    /// Sets yield, P/E, P/B and EPS in one go.
    #[must_use]
    pub const fn with_ratios(
        mut self,
        yield_ratio: Option<f64>,
        pe_ratio: Option<f64>,
        pb_ratio: Option<f64>,
        eps: Option<f64>,
    ) -> Self {
        self.yield_ratio = yield_ratio;
        self.pe_ratio = pe_ratio;
        self.pb_ratio = pb_ratio;
        self.eps = eps;
        self
    }
}
