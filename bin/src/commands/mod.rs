//! CLI command implementations.

pub(crate) mod dividends;
pub(crate) mod history;
pub(crate) mod parse;
pub(crate) mod quote;
pub(crate) mod watch;
