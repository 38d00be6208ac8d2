//! Parse command implementation.
//!
//! Reads a feed body saved to disk (or piped on stdin) and converts it to one
//! of the output formats, without touching the network.

use crate::display::{Format, open_output, write_records};
use aastocks_lib::prelude::*;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;

/// Parse a saved feed body.
pub(crate) fn parse(
    input: &Path,
    frequency: PriceFrequency,
    year: Option<i32>,
    format: Format,
    output: Option<PathBuf>,
) -> Result<()> {
    let parser = match year {
        Some(year) => SeriesParser::new(frequency).with_year(year),
        None => SeriesParser::new(frequency),
    };

    let result = if input == Path::new("-") {
        parser.parse(io::stdin().lock())
    } else {
        let file = File::open(input)
            .with_context(|| format!("Failed to open {}", input.display()))?;
        parser.parse(BufReader::new(file))
    };
    let series = result.with_context(|| format!("Failed to parse {}", input.display()))?;

    info!(bars = series.len(), %frequency, "parsed feed");

    let writer = open_output(output.as_deref())?;
    write_records(series.records(), writer, format)
}
