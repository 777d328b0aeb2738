///! Parsers for the four payloads the booking site returns
///!
///! Everything here is pure: text in, typed values out. The HTTP side lives
///! in `client`.

use chrono::NaiveDate;
use flybg_common::{FlightOffer, ISO_DATE_FORMAT};
use scraper::{ElementRef, Html, Selector};

use super::types::{Result, ScraperError};

/// Element id of the quotes table inside the iframe page
pub const QUOTES_TABLE_ID: &str = "flywiz_tblQuotes";

/// Format of a single entry in the date list blob, e.g. "2024,6,1"
const DATE_ENTRY_FORMAT: &str = "%Y,%m,%d";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Scrape(format!("Invalid CSS selector {}: {:?}", css, e)))
}

/// Parse the JSON array returned by the arrival-city lookup.
pub fn parse_arrival_airports(json: &str) -> Result<Vec<String>> {
    serde_json::from_str(json)
        .map_err(|e| ScraperError::RemoteLookup(format!("Arrival airport list is not a JSON array of codes: {}", e)))
}

/// Parse the date-list blob into ISO-8601 strings, keeping the site's order.
///
/// The blob looks like `[2024,6,1],[2024,6,8],-...`: only the part before the
/// first `-` is used, brackets become separators, and every entry carries one
/// trailing character that is dropped before parsing.
pub fn parse_available_dates(text: &str) -> Result<Vec<String>> {
    let head = text.split('-').next().unwrap_or_default();
    let cleaned = head.replace('[', " ").replace(']', "");
    let cleaned = cleaned.trim_start();

    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    cleaned
        .split(' ')
        .map(|token| {
            let mut chars = token.chars();
            chars.next_back();
            NaiveDate::parse_from_str(chars.as_str(), DATE_ENTRY_FORMAT)
                .map(|date| date.format(ISO_DATE_FORMAT).to_string())
                .map_err(|e| ScraperError::RemoteLookup(format!("Unrecognised entry '{}' in date list: {}", token, e)))
        })
        .collect()
}

/// `src` of the first iframe on the search page.
pub fn extract_iframe_src(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let iframe_sel = selector("iframe")?;

    document
        .select(&iframe_sel)
        .find_map(|iframe| iframe.value().attr("src"))
        .map(str::to_string)
        .ok_or_else(|| ScraperError::Scrape("Search page has no iframe with a src".to_string()))
}

fn cell_texts(row: ElementRef<'_>, cell_sel: &Selector) -> Vec<String> {
    row.select(cell_sel).map(|td| td.text().collect::<String>()).collect()
}

/// Parse the quotes table on the iframe page.
///
/// Every flight spans two data rows (rows with more than one cell): the first
/// carries airport, times and flight numbers, the second price and arrival.
pub fn parse_quotes_table(html: &str) -> Result<Vec<FlightOffer>> {
    let document = Html::parse_document(html);
    let table_sel = selector(&format!("table#{}", QUOTES_TABLE_ID))?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScraperError::Scrape(format!("No table with id {}", QUOTES_TABLE_ID)))?;

    let rows: Vec<Vec<String>> = table
        .select(&row_sel)
        .map(|tr| cell_texts(tr, &cell_sel))
        .filter(|cells| cells.len() > 1)
        .collect();

    if rows.len() % 2 != 0 {
        return Err(ScraperError::Scrape(format!(
            "Quotes table has {} data rows, expected pairs",
            rows.len()
        )));
    }

    tracing::debug!("Quotes table has {} flights", rows.len() / 2);

    rows.chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| offer_from_rows(index, &pair[0], &pair[1]))
        .collect()
}

fn offer_from_rows(index: usize, first: &[String], second: &[String]) -> Result<FlightOffer> {
    let cell = |row: &[String], column: usize| -> Result<String> {
        row.get(column).cloned().ok_or_else(|| {
            ScraperError::Scrape(format!("Flight {} is missing column {}", index + 1, column))
        })
    };

    Ok(FlightOffer {
        departure_airport: cell(first, 1)?,
        outbound_time: cell(first, 2)?,
        inbound_time: cell(first, 3)?,
        outbound_flight: cell(first, 4)?,
        inbound_flight: cell(first, 5)?,
        price: text_after(&cell(second, 1)?, ':', index)?,
        arrival_airport: text_after(&cell(second, 2)?, ',', index)?,
    })
}

/// Text after the first `separator`, left-trimmed. "Price: 120 EUR" -> "120 EUR"
fn text_after(text: &str, separator: char, index: usize) -> Result<String> {
    text.split_once(separator)
        .map(|(_, rest)| rest.trim_start().to_string())
        .ok_or_else(|| {
            ScraperError::Scrape(format!(
                "Flight {}: no '{}' in '{}'",
                index + 1,
                separator,
                text
            ))
        })
}
