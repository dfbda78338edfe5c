//! Manual delimited uploads as the offline calendar source.
//!
//! The upload contract is fixed: required columns Date, Category, Actual,
//! Forecast, Report; optional Previous, Country, Impact. Header matching is
//! case-insensitive. Categories come from the file rather than the keyword
//! table, so a manual row can place a report wherever the analyst wants it.

use csv::ReaderBuilder;

use crate::models::{Category, EconomicEvent, Impact};
use crate::parsing;
use crate::services::FetchError;
use crate::signals;

const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Category", "Actual", "Forecast", "Report"];

pub fn parse_manual_csv(body: &str) -> Result<Vec<EconomicEvent>, FetchError> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FetchError::Malformed(e.to_string()))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };

    for required in REQUIRED_COLUMNS {
        if column(required).is_none() {
            return Err(FetchError::MissingColumn(required.to_string()));
        }
    }

    let get = |record: &csv::StringRecord, name: &str| -> Option<String> {
        column(name)
            .and_then(|i| record.get(i))
            .map(str::to_string)
            .filter(|v| !v.is_empty())
    };

    let mut events = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| FetchError::Malformed(e.to_string()))?;

        let date_raw = get(&record, "Date").unwrap_or_default();
        let date = parsing::parse_event_date(&date_raw).ok_or_else(|| {
            FetchError::Malformed(format!("row {}: invalid date '{}'", row + 1, date_raw))
        })?;

        let category = get(&record, "Category")
            .map(|c| Category::from_label(&c))
            .unwrap_or(Category::Other);
        let impact = get(&record, "Impact")
            .map(|i| Impact::from_label(&i))
            .unwrap_or(Impact::Medium);

        events.push(
            EconomicEvent::new(date, get(&record, "Report").unwrap_or_default())
                .with_country(get(&record, "Country"))
                .with_category(category)
                .with_impact(impact)
                .with_values(
                    get(&record, "Actual"),
                    get(&record, "Forecast"),
                    get(&record, "Previous"),
                ),
        );
    }

    events.sort_by_key(|e| e.date);
    signals::rescore(&mut events);
    Ok(events)
}
