//! Provider client for AAStocks: historical feed, quote detail and dividend pages.
//!
//! This crate provides the provider-facing side of the client:
//!
//! - [`url::historical_url`] - Constructs chart data feed URLs
//! - [`FeedClient`] - HTTP client for the chart data feed
//! - [`parse_series`] - Wire-format decoding into a [`PriceSeries`](aastocks_types::PriceSeries)
//! - [`parse_detail_page`] / [`parse_dividend_page`] - Quote detail and dividend page extraction
//! - [`DetailQuoteSource`] - A quote source polling the quote detail page
//! - [`FeedQuoteSource`] - A quote source polling the intraday feed

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/horacehylee/aastocks-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod detail;
mod dividend;
mod html;
mod parse;
mod source;
pub mod url;

pub use client::{ClientConfig, FeedClient, FeedError};
pub use detail::parse_detail_page;
pub use dividend::parse_dividend_page;
pub use html::PageError;
pub use parse::{
    FIELD_DELIMITER, Field, ParseError, RECORD_DELIMITER, SeriesParser, parse_series,
    parse_series_bytes,
};
pub use source::{DetailQuoteSource, FeedQuoteSource};
