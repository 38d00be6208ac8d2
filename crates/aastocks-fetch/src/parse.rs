//! Historical price parsing from the chart data feed format.

use aastocks_types::{PriceFrequency, PriceRecord, PriceSeries};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use std::io::BufRead;
use thiserror::Error;
use tracing::debug;

/// Separator between records.
pub const RECORD_DELIMITER: u8 = b'|';

/// Separator between fields within a record.
pub const FIELD_DELIMITER: char = ';';

/// Leading metadata records (quote name, current price).
const HEADER_RECORDS: usize = 2;

/// Marker the provider puts on revised values; carries no meaning.
const REVISION_MARKER: char = '!';

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Logical field of a price record, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Date, or month/day plus time of day.
    Time,
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Time => "Time",
            Self::Open => "Open price",
            Self::High => "High price",
            Self::Low => "Low price",
            Self::Close => "Close price",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during historical price parsing.
///
/// `record` is the zero-based position of the offending record in the
/// stream, metadata records included.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A record had neither 7 nor 8 fields.
    #[error("Invalid field count in record {record}: {count} (expected 7 or 8)")]
    FieldCount {
        /// Record position.
        record: usize,
        /// Number of fields found.
        count: usize,
    },

    /// A date, time or price field could not be parsed.
    #[error("{field} failed to be parsed in record {record}: {value:?}")]
    InvalidField {
        /// Record position.
        record: usize,
        /// The field that failed.
        field: Field,
        /// Raw field text.
        value: String,
    },

    /// A record was not valid UTF-8.
    #[error("Record {record} is not valid UTF-8")]
    InvalidUtf8 {
        /// Record position.
        record: usize,
    },

    /// Reading the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Returns the failing field for [`ParseError::InvalidField`].
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Decoder for one historical price stream.
///
/// Hourly rows carry no year. The parser stamps them with the year it was
/// created in (UTC), so a series fetched in early January will date late
/// December bars into the wrong year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesParser {
    frequency: PriceFrequency,
    year: i32,
}

impl SeriesParser {
    /// Creates a parser that assumes the current UTC year for intraday rows.
    #[must_use]
    pub fn new(frequency: PriceFrequency) -> Self {
        Self {
            frequency,
            year: Utc::now().year(),
        }
    }

    /// Overrides the year assumed for intraday rows.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Returns the year assumed for intraday rows.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the frequency attached to parsed series.
    #[must_use]
    pub const fn frequency(&self) -> PriceFrequency {
        self.frequency
    }

    /// Parses a whole stream into a series.
    ///
    /// The first malformed record aborts the call; no partial series is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error on a wrong field count, an unparseable field,
    /// non-UTF-8 data, or a read failure.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<PriceSeries, ParseError> {
        let mut records = Vec::new();
        // A blank record is only allowed as the last one (trailing `|`).
        let mut blank = None;

        for (index, chunk) in reader.split(RECORD_DELIMITER).enumerate() {
            let chunk = chunk?;
            if index < HEADER_RECORDS {
                continue;
            }
            if let Some(record) = blank.take() {
                return Err(ParseError::FieldCount { record, count: 1 });
            }

            let text = std::str::from_utf8(&chunk)
                .map_err(|_| ParseError::InvalidUtf8 { record: index })?
                .trim();
            if text.is_empty() {
                blank = Some(index);
                continue;
            }

            records.push(self.parse_record(index, text)?);
        }

        debug!(
            frequency = %self.frequency,
            records = records.len(),
            "parsed historical series"
        );
        Ok(PriceSeries::new(self.frequency, records))
    }

    fn parse_record(&self, record: usize, text: &str) -> Result<PriceRecord, ParseError> {
        let fields: Vec<&str> = text.split(FIELD_DELIMITER).collect();

        let (timestamp, [open, high, low, close]) = match fields.as_slice() {
            [date, open, high, low, close, _, _] => {
                (parse_date(record, date)?, [*open, *high, *low, *close])
            }
            [month_day, time, open, high, low, close, _, _] => (
                self.parse_intraday(record, month_day, time)?,
                [*open, *high, *low, *close],
            ),
            other => {
                return Err(ParseError::FieldCount {
                    record,
                    count: other.len(),
                });
            }
        };

        Ok(PriceRecord::new(
            timestamp,
            parse_price(record, Field::Open, open)?,
            parse_price(record, Field::High, high)?,
            parse_price(record, Field::Low, low)?,
            parse_price(record, Field::Close, close)?,
        ))
    }

    fn parse_intraday(
        &self,
        record: usize,
        month_day: &str,
        time: &str,
    ) -> Result<DateTime<Utc>, ParseError> {
        let dated = format!("{}/{}", clean(month_day), self.year);
        let date = NaiveDate::parse_from_str(&dated, DATE_FORMAT)
            .map_err(|_| invalid(record, Field::Time, month_day))?;
        let time_of_day = NaiveTime::parse_from_str(&clean(time), TIME_FORMAT)
            .map_err(|_| invalid(record, Field::Time, time))?;
        Ok(date.and_time(time_of_day).and_utc())
    }
}

/// Parses a historical price stream.
///
/// Intraday rows are stamped with the current UTC year.
///
/// # Errors
///
/// See [`SeriesParser::parse`].
pub fn parse_series<R: BufRead>(
    reader: R,
    frequency: PriceFrequency,
) -> Result<PriceSeries, ParseError> {
    SeriesParser::new(frequency).parse(reader)
}

/// Parses a historical price response body.
///
/// # Errors
///
/// See [`SeriesParser::parse`].
pub fn parse_series_bytes(
    data: &[u8],
    frequency: PriceFrequency,
) -> Result<PriceSeries, ParseError> {
    parse_series(data, frequency)
}

fn parse_date(record: usize, raw: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDate::parse_from_str(&clean(raw), DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| invalid(record, Field::Time, raw))
}

fn parse_price(record: usize, field: Field, raw: &str) -> Result<f64, ParseError> {
    clean(raw)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid(record, field, raw))
}

fn clean(raw: &str) -> String {
    raw.trim().replace(REVISION_MARKER, "")
}

fn invalid(record: usize, field: Field, raw: &str) -> ParseError {
    ParseError::InvalidField {
        record,
        field,
        value: raw.to_string(),
    }
}
