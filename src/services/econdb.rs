//! EconDB economic calendar API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::models::{EconomicEvent, Impact};
use crate::parsing;
use crate::services::{CalendarProvider, CalendarSource, FetchError, FetchWindow};
use crate::signals;

#[derive(Debug, Deserialize)]
struct EconDbResponse {
    #[serde(default)]
    results: Vec<EconDbEvent>,
}

#[derive(Debug, Deserialize)]
struct EconDbEvent {
    date: String,
    indicator: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    actual: Option<String>,
    #[serde(default)]
    consensus: Option<String>,
    #[serde(default)]
    previous: Option<String>,
    /// 1-3 ordinal, already numeric on this API.
    #[serde(default)]
    importance: Option<i64>,
}

impl EconDbEvent {
    fn into_event(self) -> Option<EconomicEvent> {
        let date = parsing::parse_event_date(&self.date)?;
        Some(
            EconomicEvent::new(date, self.indicator)
                .with_country(self.country)
                .with_impact(Impact::from_rank(self.importance.unwrap_or(1)))
                .with_values(self.actual, self.consensus, self.previous),
        )
    }
}

pub struct EconDbProvider {
    client: reqwest::Client,
    base_url: String,
}

impl EconDbProvider {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl CalendarProvider for EconDbProvider {
    fn source(&self) -> CalendarSource {
        CalendarSource::Econdb
    }

    async fn fetch_events(&self, window: FetchWindow) -> Result<Vec<EconomicEvent>, FetchError> {
        let url = format!(
            "{}/api/calendar/?from={}&to={}&format=json",
            self.base_url.trim_end_matches('/'),
            window.from,
            window.to
        );
        let response = self.client.get(&url).send().await.map_err(FetchError::from)?;
        if !response.status().is_success() {
            return Err(FetchError::UpstreamStatus(response.status().as_u16()));
        }
        let body = response.text().await.map_err(FetchError::from)?;
        let parsed: EconDbResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut events: Vec<EconomicEvent> = parsed
            .results
            .into_iter()
            .filter_map(EconDbEvent::into_event)
            .filter(|e| window.contains(e.date))
            .collect();
        events.sort_by_key(|e| e.date);
        signals::enrich(&mut events);

        debug!(
            count = events.len(),
            from = %window.from,
            to = %window.to,
            "fetched {} events from EconDB",
            events.len()
        );
        Ok(events)
    }
}
