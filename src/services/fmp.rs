//! FinancialModelingPrep economic calendar.
//!
//! Unlike the feed sources, FMP takes an explicit from/to range and an API
//! key (the public "demo" key works for evaluation). Values arrive as JSON
//! numbers or nulls rather than display strings.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::models::{EconomicEvent, Impact};
use crate::parsing;
use crate::services::{CalendarProvider, CalendarSource, FetchError, FetchWindow};
use crate::signals;

#[derive(Debug, Deserialize)]
struct FmpEvent {
    date: String,
    event: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    actual: Option<serde_json::Value>,
    #[serde(default)]
    estimate: Option<serde_json::Value>,
    #[serde(default)]
    previous: Option<serde_json::Value>,
    #[serde(default)]
    impact: Option<String>,
}

/// FMP mixes numbers, strings, and nulls in the value fields across
/// indicator types; normalize everything back to the raw-string form the
/// cleaning layer expects.
fn value_to_raw(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

impl FmpEvent {
    fn into_event(self) -> Option<EconomicEvent> {
        let date = parsing::parse_event_date(&self.date)?;
        Some(
            EconomicEvent::new(date, self.event)
                .with_country(self.country)
                .with_impact(Impact::from_label(self.impact.as_deref().unwrap_or("")))
                .with_values(
                    value_to_raw(self.actual),
                    value_to_raw(self.estimate),
                    value_to_raw(self.previous),
                ),
        )
    }
}

pub struct FmpCalendarProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FmpCalendarProvider {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl CalendarProvider for FmpCalendarProvider {
    fn source(&self) -> CalendarSource {
        CalendarSource::Fmp
    }

    async fn fetch_events(&self, window: FetchWindow) -> Result<Vec<EconomicEvent>, FetchError> {
        let url = format!(
            "{}/api/v3/economic_calendar?from={}&to={}&apikey={}",
            self.base_url.trim_end_matches('/'),
            window.from,
            window.to,
            self.api_key
        );
        let response = self.client.get(&url).send().await.map_err(FetchError::from)?;
        if !response.status().is_success() {
            return Err(FetchError::UpstreamStatus(response.status().as_u16()));
        }
        let body = response.text().await.map_err(FetchError::from)?;
        let feed: Vec<FmpEvent> =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut events: Vec<EconomicEvent> = feed
            .into_iter()
            .filter_map(FmpEvent::into_event)
            .filter(|e| window.contains(e.date))
            .collect();
        events.sort_by_key(|e| e.date);
        signals::enrich(&mut events);

        debug!(
            count = events.len(),
            from = %window.from,
            to = %window.to,
            "fetched {} events from FMP",
            events.len()
        );
        Ok(events)
    }
}
