//! Events delivered by a live price stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{QuoteSnapshot, SourceError};

/// Price reading published for one successful tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    /// Provider symbol.
    pub symbol: String,
    /// Last traded price.
    pub price: f64,
    /// Provider time the price was valid at (UTC).
    pub timestamp: DateTime<Utc>,
}

impl From<&QuoteSnapshot> for PriceUpdate {
    fn from(snapshot: &QuoteSnapshot) -> Self {
        Self {
            symbol: snapshot.symbol.clone(),
            price: snapshot.price,
            timestamp: snapshot.updated_at,
        }
    }
}

/// Outcome of one polling tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceEvent {
    /// The refresh succeeded.
    Price(PriceUpdate),
    /// The refresh failed; polling continues on the next tick.
    Error(SourceError),
}

impl PriceEvent {
    /// Returns the price update, if this is a price event.
    #[must_use]
    pub const fn price(&self) -> Option<&PriceUpdate> {
        match self {
            Self::Price(update) => Some(update),
            Self::Error(_) => None,
        }
    }

    /// Returns the failure, if this is an error event.
    #[must_use]
    pub const fn error(&self) -> Option<&SourceError> {
        match self {
            Self::Price(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// Returns true for error events.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<Result<QuoteSnapshot, SourceError>> for PriceEvent {
    fn from(outcome: Result<QuoteSnapshot, SourceError>) -> Self {
        match outcome {
            Ok(snapshot) => Self::Price(PriceUpdate::from(&snapshot)),
            Err(err) => Self::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_from_snapshot() {
        let at = Utc.with_ymd_and_hms(2020, 8, 29, 0, 55, 31).unwrap();
        let event = PriceEvent::from(Ok(QuoteSnapshot::new("00006", 44.4, at)));

        let update = event.price().unwrap();
        assert_eq!(update.symbol, "00006");
        assert!((update.price - 44.4).abs() < 1e-10);
        assert_eq!(update.timestamp, at);
        assert!(!event.is_error());
    }

    #[test]
    fn test_event_from_error() {
        let event = PriceEvent::from(Err(SourceError::Fetch("timeout".to_string())));
        assert!(event.is_error());
        assert!(event.price().is_none());
        assert_eq!(event.error(), Some(&SourceError::Fetch("timeout".to_string())));
    }
}
