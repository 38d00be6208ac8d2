//! The quote source seam.

use async_trait::async_trait;

use crate::{QuoteSnapshot, SourceError};

/// Something that can re-derive the current quote for one symbol.
///
/// Streaming sessions clone the source when they start and poll the private
/// copy, so `Clone` should duplicate connection configuration only (an HTTP
/// client handle, the symbol) and never share per-poll state.
#[async_trait]
pub trait QuoteSource: Send {
    /// The symbol this source reports on.
    fn symbol(&self) -> &str;

    /// Fetches a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] when the symbol is unknown upstream
    /// and [`SourceError::Fetch`] on transport or non-success responses.
    async fn refresh(&mut self) -> Result<QuoteSnapshot, SourceError>;
}
