//! Rust client for AAStocks quotes, historical prices and live price streams.
//!
//! This is a facade crate that re-exports functionality from the aastocks
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use aastocks_lib::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedClient::with_defaults()?;
//!
//!     let series = client.historical_prices("00006", PriceFrequency::Daily).await?;
//!     println!("Downloaded {} daily bars", series.len());
//!
//!     let source = DetailQuoteSource::new(client, "00006");
//!     let (mut events, handle) = start_streaming(&source, Duration::from_secs(5));
//!     for _ in 0..3 {
//!         if let Some(event) = events.recv().await {
//!             println!("{event:?}");
//!         }
//!     }
//!     handle.stop().await?;
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/horacehylee/aastocks-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use aastocks_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use aastocks_fetch::{
    ClientConfig, DetailQuoteSource, FeedClient, FeedError, FeedQuoteSource, Field, PageError,
    ParseError, SeriesParser, parse_detail_page, parse_dividend_page, parse_series,
    parse_series_bytes, url,
};

// Re-export streaming
#[cfg(feature = "stream")]
pub use aastocks_stream::{CancelHandle, PriceEvents, start_streaming};

/// Prelude module for convenient imports.
///
/// ```
/// use aastocks_lib::prelude::*;
/// ```
pub mod prelude {
    pub use aastocks_types::{
        AastocksError, Dividend, PriceEvent, PriceFrequency, PriceRecord, PriceSeries, PriceUpdate,
        QuoteSnapshot, QuoteSource, Result, SourceError,
    };

    #[cfg(feature = "fetch")]
    pub use aastocks_fetch::{
        ClientConfig, DetailQuoteSource, FeedClient, FeedQuoteSource, PageError, ParseError,
        SeriesParser, parse_series, parse_series_bytes,
    };

    #[cfg(feature = "stream")]
    pub use aastocks_stream::{CancelHandle, PriceEvents, start_streaming};
}
