//! Dividend history page extraction.

use aastocks_types::Dividend;
use chrono::NaiveDate;
use scraper::{ElementRef, Html};

use crate::html::{PageError, children_named, labelled_parent, selector, text_of};

/// Sole cell of the table when a symbol never paid a dividend.
const NO_DIVIDENDS: &str = "No related information.";

/// Cell text for a date that does not apply.
const BLANK: &str = "-";

const DATE_FORMAT: &str = "%Y/%m/%d";

const ANNOUNCE_DATE: &str = "Announce Date";
const YEAR_ENDED: &str = "Year Ended";
const EVENT: &str = "Event";
const PARTICULAR: &str = "Particular";
const TYPE: &str = "Type";
const EX_DATE: &str = "Ex-Date";
const PAYABLE_DATE: &str = "Payable Date";

const COLUMNS: [&str; 7] = [
    ANNOUNCE_DATE,
    YEAR_ENDED,
    EVENT,
    PARTICULAR,
    TYPE,
    EX_DATE,
    PAYABLE_DATE,
];

/// Extracts the dividend history table from a dividend page.
///
/// Columns are located by header text, so extra or reordered columns are
/// tolerated. Rows come back in page order (newest first on the live site).
///
/// # Errors
///
/// Returns [`PageError::Missing`] when the table or one of the expected
/// headers is absent, and [`PageError::Invalid`] for an unparseable date.
pub fn parse_dividend_page(body: &str) -> Result<Vec<Dividend>, PageError> {
    let page = Html::parse_document(body);
    let section = labelled_parent(
        page.root_element(),
        &selector(".content div")?,
        "Dividend History",
    )
    .ok_or(PageError::Missing {
        field: "Dividend table",
    })?;
    let table = section
        .select(&selector("tbody")?)
        .next()
        .ok_or(PageError::Missing {
            field: "Dividend table",
        })?;

    let mut rows = children_named(table, "tr");
    let headers: Vec<String> = rows
        .next()
        .map(cells)
        .ok_or(PageError::Missing {
            field: "Dividend table headers",
        })?;
    if headers.is_empty() {
        return Err(PageError::Missing {
            field: "Dividend table headers",
        });
    }
    if headers.len() == 1 && headers[0] == NO_DIVIDENDS {
        return Ok(Vec::new());
    }

    let mut index = [0usize; COLUMNS.len()];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header == column)
            .ok_or(PageError::Missing { field: column })?;
    }
    let [announce, year_ended, event, particular, kind, ex_date, payable] = index;

    rows.map(|row| -> Result<Dividend, PageError> {
        let values = cells(row);
        let cell = |i: usize| values.get(i).map_or("", String::as_str);
        Ok(Dividend {
            announce_date: date(ANNOUNCE_DATE, cell(announce))?,
            year_ended: month(cell(year_ended))?,
            event: cell(event).to_string(),
            particular: cell(particular).to_string(),
            kind: cell(kind).to_string(),
            ex_date: date(EX_DATE, cell(ex_date))?,
            payable_date: date(PAYABLE_DATE, cell(payable))?,
        })
    })
    .collect()
}

fn cells(row: ElementRef<'_>) -> Vec<String> {
    children_named(row, "td").map(text_of).collect()
}

fn date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, PageError> {
    if raw == BLANK {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| PageError::Invalid {
            field,
            value: raw.to_string(),
        })
}

/// Parses a `YYYY/MM` cell, pinned to the first of the month.
fn month(raw: &str) -> Result<Option<NaiveDate>, PageError> {
    if raw == BLANK {
        return Ok(None);
    }
    NaiveDate::parse_from_str(&format!("{raw}/01"), DATE_FORMAT)
        .map(Some)
        .map_err(|_| PageError::Invalid {
            field: YEAR_ENDED,
            value: raw.to_string(),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const HEADER_ROW: &str = "<tr><td>Announce Date</td><td>Year Ended</td><td>Event</td><td>Particular</td><td>Type</td><td>Ex-Date</td><td>Book Close Date</td><td>Payable Date</td></tr>";

    pub(crate) fn dividend_page(rows: &[&str]) -> String {
        format!(
            r#"<html><body><div class="content">
<div class="grid_11">
  <div class="mainTitle">Dividend History</div>
  <table class="tblM"><tbody>{}</tbody></table>
</div>
</div></body></html>"#,
            rows.concat()
        )
    }

    pub(crate) fn power_assets_dividends() -> String {
        dividend_page(&[
            HEADER_ROW,
            "<tr><td>2020/08/05</td><td>2020/12</td><td>Interim</td><td>D:HKD 0.7700</td><td>Cash</td><td>2020/09/03</td><td>2020/09/04-2020/09/07</td><td>2020/09/15</td></tr>",
            "<tr><td>2013/09/27</td><td>-</td><td>Special</td><td>Preferential Offer: 1 HK Electric Investments Share Stapled unit for every 4 Shares held</td><td>-</td><td>2014/01/08</td><td>-</td><td>-</td></tr>",
        ])
    }

    #[test]
    fn test_parse_dividend_rows() {
        let dividends = parse_dividend_page(&power_assets_dividends()).unwrap();
        assert_eq!(dividends.len(), 2);

        let interim = &dividends[0];
        assert_eq!(interim.announce_date, NaiveDate::from_ymd_opt(2020, 8, 5));
        assert_eq!(interim.year_ended, NaiveDate::from_ymd_opt(2020, 12, 1));
        assert_eq!(interim.event, "Interim");
        assert_eq!(interim.particular, "D:HKD 0.7700");
        assert!(interim.is_cash());
        assert_eq!(interim.ex_date, NaiveDate::from_ymd_opt(2020, 9, 3));
        assert_eq!(interim.payable_date, NaiveDate::from_ymd_opt(2020, 9, 15));

        let special = &dividends[1];
        assert_eq!(special.event, "Special");
        assert_eq!(special.year_ended, None);
        assert_eq!(special.kind, "-");
        assert_eq!(special.ex_date, NaiveDate::from_ymd_opt(2014, 1, 8));
        assert_eq!(special.payable_date, None);
    }

    #[test]
    fn test_no_dividends() {
        let page = dividend_page(&["<tr><td>No related information.</td></tr>"]);
        assert!(parse_dividend_page(&page).unwrap().is_empty());
    }

    #[test]
    fn test_missing_header_column() {
        let page = dividend_page(&[
            "<tr><td>Announce Date</td><td>Year Ended</td><td>Event</td><td>Particular</td><td>Type</td><td>Ex-Date</td></tr>",
        ]);
        assert_eq!(
            parse_dividend_page(&page).unwrap_err(),
            PageError::Missing {
                field: "Payable Date"
            }
        );
    }

    #[test]
    fn test_invalid_date_cell() {
        let page = dividend_page(&[
            HEADER_ROW,
            "<tr><td>2020-08-05</td><td>2020/12</td><td>Interim</td><td>D</td><td>Cash</td><td>-</td><td>-</td><td>-</td></tr>",
        ]);
        assert_eq!(
            parse_dividend_page(&page).unwrap_err(),
            PageError::Invalid {
                field: "Announce Date",
                value: "2020-08-05".to_string()
            }
        );
    }

    #[test]
    fn test_missing_table() {
        let err = parse_dividend_page("<html><body><p>maintenance</p></body></html>").unwrap_err();
        assert!(matches!(err, PageError::Missing { .. }));
    }
}
