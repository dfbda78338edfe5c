//! FairEconomy weekly calendar feed (JSON, XML, and ICS renditions).
//!
//! All three renditions carry the same week of events; the feed has no
//! query parameters, so window filtering happens client-side.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::models::{EconomicEvent, Impact};
use crate::parsing;
use crate::services::{CalendarProvider, CalendarSource, FetchError, FetchWindow};
use crate::signals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Json,
    Xml,
    Ics,
}

/// One event as the JSON and XML renditions encode it. The XML rendition
/// splits the timestamp into separate date ("11-18-2024") and time
/// ("2:00am") elements; the JSON rendition uses a single RFC 3339 string.
#[derive(Debug, Default, Deserialize)]
struct FeedEvent {
    title: String,
    #[serde(default)]
    country: Option<String>,
    date: String,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    impact: Option<String>,
    #[serde(default)]
    actual: Option<String>,
    #[serde(default)]
    forecast: Option<String>,
    #[serde(default)]
    previous: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeeklyEvents {
    #[serde(rename = "event", default)]
    events: Vec<FeedEvent>,
}

impl FeedEvent {
    /// Rows with an unparseable timestamp are dropped, matching the
    /// best-effort posture of the rest of the pipeline.
    fn into_event(self) -> Option<EconomicEvent> {
        let date = parsing::parse_event_date_time(&self.date, self.time.as_deref())?;
        Some(
            EconomicEvent::new(date, self.title)
                .with_country(self.country)
                .with_impact(Impact::from_label(self.impact.as_deref().unwrap_or("")))
                .with_values(self.actual, self.forecast, self.previous),
        )
    }
}

pub struct FairEconomyProvider {
    client: reqwest::Client,
    base_url: String,
    format: FeedFormat,
}

impl FairEconomyProvider {
    pub fn new(client: reqwest::Client, base_url: String, format: FeedFormat) -> Self {
        Self {
            client,
            base_url,
            format,
        }
    }

    fn feed_path(&self) -> &'static str {
        match self.format {
            FeedFormat::Json => "ff_calendar_thisweek.json",
            FeedFormat::Xml => "ff_calendar_thisweek.xml",
            FeedFormat::Ics => "ff_calendar_thisweek.ics",
        }
    }

    fn parse_body(&self, body: &str) -> Result<Vec<FeedEvent>, FetchError> {
        match self.format {
            FeedFormat::Json => serde_json::from_str::<Vec<FeedEvent>>(body)
                .map_err(|e| FetchError::Malformed(e.to_string())),
            FeedFormat::Xml => quick_xml::de::from_str::<WeeklyEvents>(body)
                .map(|weekly| weekly.events)
                .map_err(|e| FetchError::Malformed(e.to_string())),
            FeedFormat::Ics => parse_ics(body),
        }
    }
}

#[async_trait]
impl CalendarProvider for FairEconomyProvider {
    fn source(&self) -> CalendarSource {
        match self.format {
            FeedFormat::Json => CalendarSource::Faireconomy,
            FeedFormat::Xml => CalendarSource::FaireconomyXml,
            FeedFormat::Ics => CalendarSource::FaireconomyIcs,
        }
    }

    async fn fetch_events(&self, window: FetchWindow) -> Result<Vec<EconomicEvent>, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), self.feed_path());
        let response = self.client.get(&url).send().await.map_err(FetchError::from)?;
        if !response.status().is_success() {
            return Err(FetchError::UpstreamStatus(response.status().as_u16()));
        }
        let body = response.text().await.map_err(FetchError::from)?;

        let feed = self.parse_body(&body)?;
        let mut events: Vec<EconomicEvent> = feed
            .into_iter()
            .filter_map(FeedEvent::into_event)
            .filter(|e| window.contains(e.date))
            .collect();
        events.sort_by_key(|e| e.date);
        signals::enrich(&mut events);

        debug!(
            source = self.source().as_str(),
            count = events.len(),
            "fetched {} events from {}",
            events.len(),
            url
        );
        Ok(events)
    }
}

/// Parse the ICS rendition: VEVENT blocks with the release details packed
/// into DESCRIPTION as escaped "Key: value" lines. Lines are unfolded per
/// RFC 5545 (a continuation line starts with whitespace) before parsing.
fn parse_ics(body: &str) -> Result<Vec<FeedEvent>, FetchError> {
    let mut lines: Vec<String> = Vec::new();
    for raw in body.lines() {
        let trimmed_end = raw.trim_end_matches('\r');
        if trimmed_end.starts_with(' ') || trimmed_end.starts_with('\t') {
            if let Some(last) = lines.last_mut() {
                last.push_str(trimmed_end.trim_start());
                continue;
            }
        }
        lines.push(trimmed_end.to_string());
    }

    if !lines.iter().any(|l| l.starts_with("BEGIN:VCALENDAR")) {
        return Err(FetchError::Malformed("not an ICS calendar".to_string()));
    }

    let mut events = Vec::new();
    let mut current: Option<FeedEvent> = None;
    for line in lines {
        match line.as_str() {
            "BEGIN:VEVENT" => current = Some(FeedEvent::default()),
            "END:VEVENT" => {
                if let Some(event) = current.take() {
                    events.push(event);
                }
            }
            _ => {
                let Some(event) = current.as_mut() else {
                    continue;
                };
                let Some((name, value)) = line.split_once(':') else {
                    continue;
                };
                // Property parameters (DTSTART;TZID=...) are irrelevant here.
                let property = name.split(';').next().unwrap_or(name);
                match property {
                    "SUMMARY" => event.title = unescape_ics(value),
                    "DTSTART" => event.date = value.to_string(),
                    "LOCATION" => event.country = Some(unescape_ics(value)),
                    "DESCRIPTION" => apply_description(event, value),
                    _ => {}
                }
            }
        }
    }
    Ok(events)
}

/// DESCRIPTION carries "Impact: High\nActual: 3.1%\nForecast: 2.8%\n..."
/// with literal backslash-n escapes.
fn apply_description(event: &mut FeedEvent, description: &str) {
    for part in description.split("\\n") {
        let Some((key, value)) = part.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        if value.is_empty() {
            continue;
        }
        match key.trim().to_lowercase().as_str() {
            "impact" => event.impact = Some(value),
            "actual" => event.actual = Some(value),
            "forecast" => event.forecast = Some(value),
            "previous" => event.previous = Some(value),
            _ => {}
        }
    }
}

fn unescape_ics(value: &str) -> String {
    value
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\n", " ")
        .replace("\\\\", "\\")
}
