//! Dividends command implementation.

use crate::display::{Format, open_output, write_dividends};
use aastocks_lib::prelude::*;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Download a symbol's dividend history and write it out.
pub(crate) async fn dividends(
    config: ClientConfig,
    symbol: &str,
    format: Format,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = FeedClient::new(config)?;
    let dividends = client
        .dividends(symbol)
        .await
        .with_context(|| format!("Failed to fetch dividends for {symbol}"))?;

    info!(%symbol, rows = dividends.len(), "downloaded dividend history");

    let writer = open_output(output.as_deref())?;
    write_dividends(&dividends, writer, format)
}
