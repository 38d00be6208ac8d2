//! Display utilities and output formatting for the aastocks CLI.

use aastocks_lib::prelude::*;
use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output format for price records and dividends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Opens the output file, or stdout when no path is given.
pub(crate) fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Write price records in the specified format.
pub(crate) fn write_records<W: Write>(
    records: &[PriceRecord],
    mut writer: W,
    format: Format,
) -> Result<()> {
    match format {
        Format::Csv => {
            writeln!(writer, "timestamp,open,high,low,close")?;
            for record in records {
                writeln!(
                    writer,
                    "{},{},{},{},{}",
                    record.timestamp.format(TIMESTAMP_FORMAT),
                    record.open,
                    record.high,
                    record.low,
                    record.close
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
        Format::Ndjson => {
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write dividend rows in the specified format. Missing dates are empty in
/// CSV and `null` in JSON.
pub(crate) fn write_dividends<W: Write>(
    dividends: &[Dividend],
    mut writer: W,
    format: Format,
) -> Result<()> {
    match format {
        Format::Csv => {
            writeln!(
                writer,
                "announce_date,year_ended,event,particular,type,ex_date,payable_date"
            )?;
            for dividend in dividends {
                writeln!(
                    writer,
                    "{},{},{},{},{},{},{}",
                    csv_date(dividend.announce_date),
                    dividend.year_ended.map(|d| d.format("%Y-%m").to_string()).unwrap_or_default(),
                    csv_text(&dividend.event),
                    csv_text(&dividend.particular),
                    csv_text(&dividend.kind),
                    csv_date(dividend.ex_date),
                    csv_date(dividend.payable_date),
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, dividends)?;
            writeln!(writer)?;
        }
        Format::Ndjson => {
            for dividend in dividends {
                serde_json::to_writer(&mut writer, dividend)?;
                writeln!(writer)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn csv_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Quotes a CSV field when it contains a delimiter or quote.
fn csv_text(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Renders a quote snapshot as aligned `label: value` lines.
pub(crate) fn format_snapshot(snapshot: &QuoteSnapshot) -> String {
    fn or_na(value: Option<f64>) -> String {
        value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
    }

    let rows = [
        ("Symbol", snapshot.symbol.clone()),
        ("Name", snapshot.name.clone().unwrap_or_default()),
        ("Price", snapshot.price.to_string()),
        (
            "Yield",
            snapshot
                .yield_ratio
                .map_or_else(|| "N/A".to_string(), |y| format!("{:.3}%", y * 100.0)),
        ),
        ("P/E ratio", or_na(snapshot.pe_ratio)),
        ("P/B ratio", or_na(snapshot.pb_ratio)),
        ("EPS", or_na(snapshot.eps)),
        (
            "Lots",
            snapshot
                .lots
                .map_or_else(|| "N/A".to_string(), |lots| lots.to_string()),
        ),
        ("Updated", snapshot.updated_at.format(TIMESTAMP_FORMAT).to_string()),
    ];

    rows.iter()
        .map(|(label, value)| format!("{label:<10} {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats one live price update as a console line.
pub(crate) fn format_update(update: &PriceUpdate) -> String {
    format!(
        "{} {} {:.3}",
        update.timestamp.format(TIMESTAMP_FORMAT),
        update.symbol,
        update.price
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<PriceRecord> {
        vec![
            PriceRecord::new(
                Utc.with_ymd_and_hms(2015, 8, 26, 0, 0, 0).unwrap(),
                45.48,
                48.03,
                45.23,
                47.23,
            ),
            PriceRecord::new(
                Utc.with_ymd_and_hms(2015, 8, 27, 0, 0, 0).unwrap(),
                47.2,
                47.5,
                46.8,
                47.0,
            ),
        ]
    }

    fn render(format: Format) -> String {
        let mut buf = Vec::new();
        write_records(&sample(), &mut buf, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv_output() {
        let out = render(Format::Csv);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "timestamp,open,high,low,close");
        assert_eq!(lines[1], "2015-08-26T00:00:00Z,45.48,48.03,45.23,47.23");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_output() {
        let out = render(Format::Json);
        let parsed: Vec<PriceRecord> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_ndjson_output() {
        let out = render(Format::Ndjson);
        assert_eq!(out.lines().count(), 2);
        for line in out.lines() {
            serde_json::from_str::<PriceRecord>(line).unwrap();
        }
    }

    #[test]
    fn test_dividends_csv_quotes_text() {
        let dividends = vec![Dividend {
            announce_date: NaiveDate::from_ymd_opt(2013, 9, 27),
            year_ended: NaiveDate::from_ymd_opt(2013, 12, 1),
            event: "Special".to_string(),
            particular: "Offer: HKD 5.45, 1 unit per 4 shares".to_string(),
            kind: "-".to_string(),
            ex_date: NaiveDate::from_ymd_opt(2014, 1, 8),
            payable_date: None,
        }];
        let mut buf = Vec::new();
        write_dividends(&dividends, &mut buf, Format::Csv).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[1],
            "2013-09-27,2013-12,Special,\"Offer: HKD 5.45, 1 unit per 4 shares\",-,2014-01-08,"
        );
    }

    #[test]
    fn test_format_snapshot() {
        let snapshot = QuoteSnapshot::new(
            "09923",
            59.6,
            Utc.with_ymd_and_hms(2020, 8, 26, 2, 50, 43).unwrap(),
        )
        .with_name("YEAHKA")
        .with_lots(400)
        .with_ratios(Some(0.06271), None, None, None);

        let text = format_snapshot(&snapshot);
        assert!(text.contains("Name       YEAHKA"));
        assert!(text.contains("Yield      6.271%"));
        assert!(text.contains("P/E ratio  N/A"));
        assert!(text.contains("Lots       400"));
    }

    #[test]
    fn test_format_update() {
        let update = PriceUpdate {
            symbol: "00006".to_string(),
            price: 44.4,
            timestamp: Utc.with_ymd_and_hms(2020, 8, 29, 0, 55, 31).unwrap(),
        };
        assert_eq!(format_update(&update), "2020-08-29T00:55:31Z 00006 44.400");
    }
}
