//! Dividend history entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a symbol's dividend history.
///
/// Dates the provider leaves blank (`-`) are `None`. `year_ended` only has
/// month precision and is pinned to the first of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dividend {
    /// Date the dividend was announced.
    pub announce_date: Option<NaiveDate>,
    /// Financial year the dividend belongs to.
    pub year_ended: Option<NaiveDate>,
    /// Event name (`Interim`, `Final`, `Special`).
    pub event: String,
    /// Free-text description, e.g. `D:HKD 0.7700`.
    pub particular: String,
    /// Payment type (`Cash`, `Scrip`), `-` when not applicable.
    pub kind: String,
    /// Ex-dividend date.
    pub ex_date: Option<NaiveDate>,
    /// Payment date.
    pub payable_date: Option<NaiveDate>,
}

impl Dividend {
    /// Returns true for cash dividends.
    #[must_use]
    pub fn is_cash(&self) -> bool {
        self.kind.eq_ignore_ascii_case("cash")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dividend_serializes_missing_dates_as_null() {
        let dividend = Dividend {
            announce_date: NaiveDate::from_ymd_opt(2013, 9, 27),
            year_ended: None,
            event: "Special".to_string(),
            particular: "Preferential Offer".to_string(),
            kind: "-".to_string(),
            ex_date: NaiveDate::from_ymd_opt(2014, 1, 8),
            payable_date: None,
        };
        assert!(!dividend.is_cash());

        let json = serde_json::to_value(&dividend).unwrap();
        assert_eq!(json["announce_date"], "2013-09-27");
        assert!(json["payable_date"].is_null());
    }
}
