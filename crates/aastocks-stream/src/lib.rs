//! Live price streaming for the AAStocks quote client.
//!
//! [`start_streaming`] spawns one polling task per session and returns the
//! two halves used to drive it:
//!
//! - [`PriceEvents`] - receives price and error events in tick order
//! - [`CancelHandle`] - stops the session
//!
//! Sessions share nothing with each other. Each one polls a private clone
//! of the [`QuoteSource`](aastocks_types::QuoteSource) it was started with.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/horacehylee/aastocks-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod session;

pub use session::{CancelHandle, PriceEvents, start_streaming};
