//! Error types for the AAStocks client.

use thiserror::Error;

/// Result type alias for AAStocks operations.
pub type Result<T> = std::result::Result<T, AastocksError>;

/// Errors that can occur while fetching and decoding provider data.
#[derive(Error, Debug)]
pub enum AastocksError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Historical price data was malformed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Quote source failure.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a [`QuoteSource`](crate::QuoteSource) refresh.
///
/// A live price stream treats both variants alike: the failure becomes an
/// error event and polling continues on the next tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The symbol does not exist upstream.
    #[error("Symbol cannot be found: {symbol}")]
    NotFound {
        /// The symbol that was looked up.
        symbol: String,
    },

    /// Transport failure or non-success response.
    #[error("Failed to fetch quote details: {0}")]
    Fetch(String),
}

impl SourceError {
    /// Creates a not-found error for the given symbol.
    #[must_use]
    pub fn not_found(symbol: impl Into<String>) -> Self {
        Self::NotFound {
            symbol: symbol.into(),
        }
    }

    /// Returns true if the symbol was not found upstream.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<AastocksError> for SourceError {
    fn from(err: AastocksError) -> Self {
        match err {
            AastocksError::Source(source) => source,
            other => Self::Fetch(other.to_string()),
        }
    }
}
