//! Shared helpers for scraping AAStocks web pages.

use aastocks_types::{AastocksError, SourceError};
use scraper::{ElementRef, Selector};
use thiserror::Error;

/// Errors that can occur while extracting data from a web page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The page reports that the symbol does not exist.
    #[error("Symbol cannot be found: {symbol}")]
    NotFound {
        /// Requested symbol.
        symbol: String,
    },

    /// A required element was absent or empty.
    #[error("{field} cannot be found")]
    Missing {
        /// Name of the missing value.
        field: &'static str,
    },

    /// A value was present but could not be parsed.
    #[error("{field} failed to be parsed: {value:?}")]
    Invalid {
        /// Name of the value.
        field: &'static str,
        /// Raw text.
        value: String,
    },

    /// A CSS selector or pattern failed to compile.
    #[error("Invalid page query: {0}")]
    Query(String),
}

impl From<PageError> for AastocksError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::NotFound { symbol } => Self::Source(SourceError::NotFound { symbol }),
            other => Self::Parse(format!("Quote details cannot be parsed: {other}")),
        }
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector, PageError> {
    Selector::parse(css).map_err(|e| PageError::Query(format!("{css}: {e}")))
}

pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of every element matching `selector` under `root`, joined.
pub(crate) fn select_text(root: ElementRef<'_>, selector: &Selector) -> String {
    root.select(selector)
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Finds the innermost element matching `scope` whose text contains `label`
/// and returns its parent, which holds the label and its value side by side.
pub(crate) fn labelled_parent<'a>(
    root: ElementRef<'a>,
    scope: &Selector,
    label: &str,
) -> Option<ElementRef<'a>> {
    root.select(scope)
        .filter(|element| element.text().collect::<String>().contains(label))
        .find(|element| {
            !element.select(scope).any(|inner| {
                inner != *element && inner.text().collect::<String>().contains(label)
            })
        })
        .and_then(|element| element.parent())
        .and_then(ElementRef::wrap)
}

/// Child elements of `parent` with the given tag name.
pub(crate) fn children_named<'a>(
    parent: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}
