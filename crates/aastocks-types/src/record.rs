//! Historical OHLC records.

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::PriceFrequency;

/// How far past `now` a bar may sit before it is taken to carry the wrong
/// year. Provider times are Hong Kong local, so same-day bars can look up to
/// eight hours ahead of UTC.
const CLOCK_SKEW_DAYS: i64 = 2;

/// One historical price bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Bar time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

impl PriceRecord {
    /// Creates a new price record.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the change over the bar (close - open).
    #[must_use]
    pub fn change(&self) -> f64 {
        self.close - self.open
    }
}

/// An ordered sequence of price records at one frequency.
///
/// Records keep the order in which the provider sent them. Depending on the
/// frequency this is oldest-to-newest or newest-to-oldest; nothing is sorted
/// or de-duplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    frequency: PriceFrequency,
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Creates a series from already-decoded records.
    #[must_use]
    pub const fn new(frequency: PriceFrequency, records: Vec<PriceRecord>) -> Self {
        Self { frequency, records }
    }

    /// Creates an empty series.
    #[must_use]
    pub const fn empty(frequency: PriceFrequency) -> Self {
        Self::new(frequency, Vec::new())
    }

    /// Returns the frequency the series was requested at.
    #[must_use]
    pub const fn frequency(&self) -> PriceFrequency {
        self.frequency
    }

    /// Returns the records in encounter order.
    #[must_use]
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Returns true if the series holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns the first record in encounter order.
    #[must_use]
    pub fn first(&self) -> Option<&PriceRecord> {
        self.records.first()
    }

    /// Returns the last record in encounter order.
    #[must_use]
    pub fn last(&self) -> Option<&PriceRecord> {
        self.records.last()
    }

    /// Returns the most recent record as of `now`.
    ///
    /// Intraday rows carry no year and are stamped with the year they were
    /// parsed in, so just after New Year the December bars appear to lie in
    /// the future. Any record more than two days past `now` is moved back one
    /// year before comparing; the returned record carries the corrected
    /// timestamp. Ties resolve to the record encountered last.
    #[must_use]
    pub fn latest_as_of(&self, now: DateTime<Utc>) -> Option<PriceRecord> {
        let horizon = now + TimeDelta::days(CLOCK_SKEW_DAYS);
        self.records
            .iter()
            .map(|record| {
                let mut record = *record;
                if record.timestamp > horizon
                    && let Some(previous) = record.timestamp.with_year(record.timestamp.year() - 1)
                {
                    record.timestamp = previous;
                }
                record
            })
            .max_by_key(|record| record.timestamp)
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }

    /// Consumes the series, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<PriceRecord> {
        self.records
    }
}

impl IntoIterator for PriceSeries {
    type Item = PriceRecord;
    type IntoIter = std::vec::IntoIter<PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(day: u32, close: f64) -> PriceRecord {
        let timestamp = Utc.with_ymd_and_hms(2020, 8, day, 0, 0, 0).unwrap();
        PriceRecord::new(timestamp, 44.0, 45.0, 43.5, close)
    }

    #[test]
    fn test_record_range_and_change() {
        let bar = record(25, 44.65);
        assert!((bar.range() - 1.5).abs() < 1e-10);
        assert!((bar.change() - 0.65).abs() < 1e-10);
    }

    #[test]
    fn test_series_keeps_encounter_order() {
        let series = PriceSeries::new(
            PriceFrequency::Daily,
            vec![record(27, 1.0), record(25, 2.0), record(26, 3.0)],
        );
        let closes: Vec<f64> = series.iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first().map(|r| r.close), Some(1.0));
        assert_eq!(series.last().map(|r| r.close), Some(3.0));
        let now = Utc.with_ymd_and_hms(2020, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(series.latest_as_of(now).map(|r| r.close), Some(1.0));
    }

    #[test]
    fn test_latest_across_new_year() {
        // Parsed on 2021-01-03: the December bar was stamped 2021 as well.
        let december = Utc.with_ymd_and_hms(2021, 12, 31, 15, 0, 0).unwrap();
        let january = Utc.with_ymd_and_hms(2021, 1, 2, 10, 0, 0).unwrap();
        let series = PriceSeries::new(
            PriceFrequency::Hourly,
            vec![
                PriceRecord::new(december, 10.0, 10.0, 10.0, 10.0),
                PriceRecord::new(january, 20.0, 20.0, 20.0, 20.0),
            ],
        );
        let now = Utc.with_ymd_and_hms(2021, 1, 3, 1, 0, 0).unwrap();

        let latest = series.latest_as_of(now).unwrap();
        assert_eq!(latest.timestamp, january);
        assert!((latest.close - 20.0).abs() < 1e-10);

        let only_december = PriceSeries::new(PriceFrequency::Hourly, vec![series.records()[0]]);
        let latest = only_december.latest_as_of(now).unwrap();
        assert_eq!(
            latest.timestamp,
            Utc.with_ymd_and_hms(2020, 12, 31, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_latest_keeps_same_day_bars_ahead_of_utc() {
        let now = Utc.with_ymd_and_hms(2020, 8, 25, 2, 0, 0).unwrap();
        let later_today = Utc.with_ymd_and_hms(2020, 8, 25, 10, 0, 0).unwrap();
        let series = PriceSeries::new(
            PriceFrequency::Hourly,
            vec![
                record(24, 1.0),
                PriceRecord::new(later_today, 44.0, 45.0, 43.5, 2.0),
            ],
        );

        let latest = series.latest_as_of(now).unwrap();
        assert_eq!(latest.timestamp, later_today);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::empty(PriceFrequency::Hourly);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert_eq!(series.frequency(), PriceFrequency::Hourly);
        assert!(series.latest_as_of(Utc::now()).is_none());
    }
}
