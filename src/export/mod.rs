//! CSV export with the fixed dashboard column sets.

use crate::models::{EconomicEvent, Outlook};

/// Event table export: one row per release, raw strings as fetched plus
/// the derived signal.
pub fn events_to_csv(events: &[EconomicEvent]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Date", "Report", "Country", "Category", "Impact", "Actual", "Forecast", "Previous",
        "Signal",
    ])?;

    for event in events {
        writer.write_record([
            event.date.to_rfc3339(),
            event.report.clone(),
            event.country.clone().unwrap_or_default(),
            event.category.label().to_string(),
            event.impact.rank().to_string(),
            event.actual_raw.clone().unwrap_or_default(),
            event.forecast_raw.clone().unwrap_or_default(),
            event.previous_raw.clone().unwrap_or_default(),
            event.signal.to_string(),
        ])?;
    }

    finish(writer)
}

/// Category summary export, with the overall label as the final row.
pub fn outlook_to_csv(outlook: &Outlook) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Category", "Events", "Total", "Label"])?;

    for summary in &outlook.categories {
        writer.write_record([
            summary.category.label().to_string(),
            summary.events.to_string(),
            summary.total.to_string(),
            summary.label.label().to_string(),
        ])?;
    }
    writer.write_record([
        "Overall".to_string(),
        outlook.event_count.to_string(),
        outlook.total.to_string(),
        outlook.label.label().to_string(),
    ])?;

    finish(writer)
}

fn finish(mut writer: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    })?;
    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
