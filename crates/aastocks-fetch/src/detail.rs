//! Quote detail page extraction.

use aastocks_types::QuoteSnapshot;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::html::{PageError, labelled_parent, select_text, selector};

/// Placeholder the page shows for values that do not apply.
const NOT_AVAILABLE: &str = "N/A";

const SERVER_DATE_PATTERN: &str = r"var ServerDate = new Date\('([^']*)'\)";
const SERVER_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Extracts a quote snapshot from a quote detail page.
///
/// Yield, P/E, P/B and EPS shown as `N/A` come back as `None`. Name, price,
/// lots and the server time are required.
///
/// # Errors
///
/// Returns [`PageError::NotFound`] when the page carries the provider's
/// unknown-symbol message, and [`PageError::Missing`] or
/// [`PageError::Invalid`] when a field is absent or malformed.
pub fn parse_detail_page(symbol: &str, body: &str) -> Result<QuoteSnapshot, PageError> {
    let page = Html::parse_document(body);
    let root = page.root_element();

    if page.select(&selector("#cp_pErrMsg")?).next().is_some() {
        return Err(PageError::NotFound {
            symbol: symbol.to_string(),
        });
    }

    let name = required(
        "Name",
        select_text(root, &selector("#cp_ucStockBar_litInd_StockName")?),
    )?;
    let price = number("Price", &required("Price", select_text(root, &selector("#labelLast")?))?)?;
    let yield_ratio = percent("Yield", &quote_box_value(root, "Yield")?)?;
    let pe_ratio = ratio(
        "PE ratio",
        &required("PE ratio", select_text(root, &selector("#tbPERatio .float_r.cls")?))?,
    )?;
    let pb_ratio = ratio(
        "PB ratio",
        &required("PB ratio", select_text(root, &selector("#tbPBRatio .float_r.cls")?))?,
    )?;
    let eps = ratio("EPS", &quote_box_value(root, "EPS")?)?;
    let lots = board_lots(&quote_box_value(root, "Lots")?)?;
    let updated_at = server_date(&page)?;

    Ok(QuoteSnapshot::new(symbol, price, updated_at)
        .with_name(name)
        .with_lots(lots)
        .with_ratios(yield_ratio, pe_ratio, pb_ratio, eps))
}

/// Value cell next to a label inside the quote summary box.
fn quote_box_value(root: ElementRef<'_>, label: &'static str) -> Result<String, PageError> {
    let scope = selector(".quote-box div")?;
    let value = selector(".float_r.cls")?;
    let text = labelled_parent(root, &scope, label)
        .map(|row| select_text(row, &value))
        .unwrap_or_default();
    required(label, text)
}

fn required(field: &'static str, text: String) -> Result<String, PageError> {
    if text.is_empty() {
        Err(PageError::Missing { field })
    } else {
        Ok(text)
    }
}

fn number(field: &'static str, raw: &str) -> Result<f64, PageError> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PageError::Invalid {
            field,
            value: raw.to_string(),
        })
}

/// Leading part of a `value / secondary` cell.
fn leading(raw: &str) -> &str {
    raw.split('/').next().unwrap_or(raw).trim()
}

/// Parses the leading number of a ratio cell, `None` when not available.
fn ratio(field: &'static str, raw: &str) -> Result<Option<f64>, PageError> {
    if raw.trim().starts_with(NOT_AVAILABLE) {
        return Ok(None);
    }
    let head = leading(raw);
    number(field, head).map(Some)
}

/// Parses a `6.271%/83.79%` yield cell into a fraction.
fn percent(field: &'static str, raw: &str) -> Result<Option<f64>, PageError> {
    if raw.trim().starts_with(NOT_AVAILABLE) {
        return Ok(None);
    }
    let head = leading(raw);
    let value = head.split('%').next().unwrap_or(head);
    number(field, value).map(|value| Some(value / 100.0))
}

fn board_lots(raw: &str) -> Result<u32, PageError> {
    raw.trim()
        .replace(',', "")
        .parse::<u32>()
        .map_err(|_| PageError::Invalid {
            field: "Lots",
            value: raw.to_string(),
        })
}

/// Reads the provider time embedded in the page's inline script.
fn server_date(page: &Html) -> Result<DateTime<Utc>, PageError> {
    let pattern = Regex::new(SERVER_DATE_PATTERN).map_err(|e| PageError::Query(e.to_string()))?;
    let raw = page
        .select(&selector("script")?)
        .find_map(|script| {
            let text: String = script.text().collect();
            pattern
                .captures(&text)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .ok_or(PageError::Missing {
            field: "Server date",
        })?;

    NaiveDateTime::parse_from_str(&raw, SERVER_DATE_FORMAT)
        .map(|time| time.and_utc())
        .map_err(|_| PageError::Invalid {
            field: "Server date",
            value: raw,
        })
}
