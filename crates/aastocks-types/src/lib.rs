//! Core types for the AAStocks quote client.
//!
//! This crate provides the data structures shared by the workspace:
//!
//! - [`QuoteSnapshot`] - A point-in-time quote reading for one symbol
//! - [`PriceRecord`] - One historical OHLC bar
//! - [`PriceSeries`] - An ordered sequence of bars at one [`PriceFrequency`]
//! - [`Dividend`] - One row of a symbol's dividend history
//! - [`PriceEvent`] - A single outcome delivered by a live price stream
//! - [`QuoteSource`] - Anything that can re-fetch a [`QuoteSnapshot`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/horacehylee/aastocks-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dividend;
mod error;
mod event;
mod frequency;
mod record;
mod snapshot;
mod source;

pub use dividend::Dividend;
pub use error::{AastocksError, Result, SourceError};
pub use event::{PriceEvent, PriceUpdate};
pub use frequency::{FrequencyParseError, PriceFrequency};
pub use record::{PriceRecord, PriceSeries};
pub use snapshot::QuoteSnapshot;
pub use source::QuoteSource;
