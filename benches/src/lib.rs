//! Benchmark utilities for aastocks.
//!
//! Builds synthetic feed bodies in the provider's wire format so the parser
//! can be measured without network access.

use aastocks_types::PriceFrequency;
use chrono::{Duration, NaiveDate};

/// Header records emitted ahead of the data rows.
const HEADER: &str = "BENCH HOLDINGS|44.65";

/// Builds a feed body with `rows` data records.
///
/// Hourly feeds use the intraday shape (`MM/DD;HH:MM:SS`), every other
/// frequency uses the dated shape. Every fifth row carries a revision marker.
pub fn synthetic_feed(frequency: PriceFrequency, rows: usize) -> String {
    let mut body = String::with_capacity(HEADER.len() + rows * 56);
    body.push_str(HEADER);

    let start = NaiveDate::from_ymd_opt(2015, 1, 2)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap_or_default();

    for i in 0..rows {
        let step = match frequency {
            PriceFrequency::Hourly => Duration::hours((i % 2_000) as i64),
            PriceFrequency::Daily => Duration::days(i as i64),
            PriceFrequency::Weekly => Duration::weeks(i as i64),
            PriceFrequency::Monthly => Duration::days(30 * i as i64),
        };
        let at = start + step;
        let base = 40.0 + (i % 100) as f64 * 0.05;
        let marker = if i % 5 == 0 { "!" } else { "" };

        let stamp = match frequency {
            PriceFrequency::Hourly => {
                format!("{};{}", at.format("%m/%d"), at.format("%H:%M:%S"))
            }
            _ => at.format("%m/%d/%Y").to_string(),
        };
        body.push('|');
        body.push_str(&format!(
            "{stamp}{marker};{:.2};{:.2};{:.2};{:.2};{};0",
            base,
            base + 0.30,
            base - 0.25,
            base + 0.10,
            1_000_000 + i * 10
        ));
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use aastocks_fetch::parse_series_bytes;

    #[test]
    fn test_synthetic_feed_parses() {
        for &frequency in PriceFrequency::all() {
            let body = synthetic_feed(frequency, 50);
            let series = parse_series_bytes(body.as_bytes(), frequency).unwrap();
            assert_eq!(series.len(), 50);
        }
    }

    #[test]
    fn test_synthetic_feed_layout() {
        let body = synthetic_feed(PriceFrequency::Hourly, 2);
        assert_eq!(
            body,
            "BENCH HOLDINGS|44.65\
             |01/02;09:30:00!;40.00;40.30;39.75;40.10;1000000;0\
             |01/02;10:30:00;40.05;40.35;39.80;40.15;1000010;0"
        );

        let body = synthetic_feed(PriceFrequency::Daily, 2);
        assert!(body.ends_with("|01/03/2015;40.05;40.35;39.80;40.15;1000010;0"));
        assert_eq!(body.matches('|').count(), 3);
    }
}
