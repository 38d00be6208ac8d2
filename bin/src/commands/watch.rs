//! Watch command implementation.
//!
//! Polls a symbol on a fixed interval and prints each price as it arrives.
//! Ctrl-C cancels the session; pending prices are discarded.

use crate::display::format_update;
use aastocks_lib::prelude::*;
use anyhow::{Result, bail};
use clap::ValueEnum;
use std::time::Duration;
use tracing::{info, warn};

/// Page or feed a watch session polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SourceKind {
    /// Quote detail page (live last price)
    Detail,
    /// Close of the latest hourly bar
    Feed,
}

/// Why the watch loop ended.
enum Exit {
    Interrupted,
    Count,
    Closed,
    NotFound(SourceError),
    TooManyErrors(SourceError),
}

/// Stream live prices for a symbol.
pub(crate) async fn watch(
    config: ClientConfig,
    symbol: &str,
    source: SourceKind,
    interval: Duration,
    max_errors: u32,
    count: Option<u64>,
    quiet: bool,
) -> Result<()> {
    let client = FeedClient::new(config)?;
    match source {
        SourceKind::Detail => {
            let source = DetailQuoteSource::new(client, symbol);
            run(&source, interval, max_errors, count, quiet).await
        }
        SourceKind::Feed => {
            let source = FeedQuoteSource::new(client, symbol);
            run(&source, interval, max_errors, count, quiet).await
        }
    }
}

async fn run<S>(
    source: &S,
    interval: Duration,
    max_errors: u32,
    count: Option<u64>,
    quiet: bool,
) -> Result<()>
where
    S: QuoteSource + Clone + 'static,
{
    let symbol = source.symbol().to_string();
    let (mut events, handle) = start_streaming(source, interval);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut received = 0u64;
    let mut consecutive_errors = 0u32;

    let exit = loop {
        let event = tokio::select! {
            _ = &mut ctrl_c => break Exit::Interrupted,
            event = events.recv() => event,
        };
        let Some(event) = event else {
            break Exit::Closed;
        };
        received += 1;

        match event {
            PriceEvent::Price(update) => {
                consecutive_errors = 0;
                println!("{}", format_update(&update));
            }
            PriceEvent::Error(err) if err.is_not_found() => break Exit::NotFound(err),
            PriceEvent::Error(err) => {
                consecutive_errors += 1;
                warn!(%symbol, error = %err, consecutive_errors, "poll failed");
                if consecutive_errors >= max_errors {
                    break Exit::TooManyErrors(err);
                }
            }
        }

        if count.is_some_and(|limit| received >= limit) {
            break Exit::Count;
        }
    };

    handle.stop().await?;
    info!(%symbol, received, "price stream stopped");

    match exit {
        Exit::NotFound(err) => bail!(err),
        Exit::TooManyErrors(err) => {
            bail!("Giving up after {consecutive_errors} consecutive errors: {err}")
        }
        Exit::Interrupted => {
            if !quiet {
                eprintln!("Interrupted after {received} events");
            }
            Ok(())
        }
        Exit::Count | Exit::Closed => Ok(()),
    }
}
