//! Quote command implementation.

use crate::display::format_snapshot;
use aastocks_lib::prelude::*;
use anyhow::{Context, Result};

/// Show a symbol's quote details.
pub(crate) async fn quote(config: ClientConfig, symbol: &str, json: bool) -> Result<()> {
    let client = FeedClient::new(config)?;
    let snapshot = client
        .quote_detail(symbol)
        .await
        .with_context(|| format!("Failed to fetch quote for {symbol}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", format_snapshot(&snapshot));
    }

    Ok(())
}
