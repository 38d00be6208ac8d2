//! History command implementation.

use crate::display::{Format, open_output, write_records};
use aastocks_lib::prelude::*;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Download a symbol's historical prices and write them out.
pub(crate) async fn history(
    config: ClientConfig,
    symbol: &str,
    frequency: PriceFrequency,
    format: Format,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = FeedClient::new(config)?;
    let series = client
        .historical_prices(symbol, frequency)
        .await
        .with_context(|| format!("Failed to download {frequency} prices for {symbol}"))?;

    info!(%symbol, %frequency, bars = series.len(), "downloaded historical prices");

    let writer = open_output(output.as_deref())?;
    write_records(series.records(), writer, format)?;

    if let Some(path) = output {
        info!(path = %path.display(), "output written");
    }

    Ok(())
}
