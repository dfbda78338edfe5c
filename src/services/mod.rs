//! Upstream data providers behind narrow trait seams.

pub mod econdb;
pub mod error;
pub mod faireconomy;
pub mod fmp;
pub mod local;
pub mod prices;

pub use error::FetchError;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{DailyClose, EconomicEvent};

/// The upstream calendar families the original dashboard revisions cycled
/// through, selectable per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarSource {
    #[serde(alias = "faireconomy-json")]
    Faireconomy,
    FaireconomyXml,
    FaireconomyIcs,
    Fmp,
    Econdb,
}

impl CalendarSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarSource::Faireconomy => "faireconomy",
            CalendarSource::FaireconomyXml => "faireconomy-xml",
            CalendarSource::FaireconomyIcs => "faireconomy-ics",
            CalendarSource::Fmp => "fmp",
            CalendarSource::Econdb => "econdb",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "faireconomy" | "faireconomy-json" => Some(CalendarSource::Faireconomy),
            "faireconomy-xml" => Some(CalendarSource::FaireconomyXml),
            "faireconomy-ics" => Some(CalendarSource::FaireconomyIcs),
            "fmp" => Some(CalendarSource::Fmp),
            "econdb" => Some(CalendarSource::Econdb),
            _ => None,
        }
    }

    pub fn all() -> [CalendarSource; 5] {
        [
            CalendarSource::Faireconomy,
            CalendarSource::FaireconomyXml,
            CalendarSource::FaireconomyIcs,
            CalendarSource::Fmp,
            CalendarSource::Econdb,
        ]
    }
}

/// Date window for a calendar request, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl FetchWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Window reaching `days` back from today and one day ahead, matching
    /// the dashboard's "recent plus imminent releases" view.
    pub fn trailing(days: i64) -> Self {
        let today = Utc::now().date_naive();
        Self {
            from: today - chrono::Duration::days(days.max(0)),
            to: today + chrono::Duration::days(1),
        }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        let day = date.date_naive();
        day >= self.from && day <= self.to
    }
}

/// Economic calendar feed seam. Implementations fetch, parse, window-filter,
/// and enrich (category + signal) their events.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    fn source(&self) -> CalendarSource;

    async fn fetch_events(&self, window: FetchWindow) -> Result<Vec<EconomicEvent>, FetchError>;
}

/// Daily close history seam for the seasonality view.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        years: u32,
    ) -> Result<Vec<DailyClose>, FetchError>;
}

/// One shared client with the configured short timeout; every provider
/// request goes through it.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent("macropulse/0.1")
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))
}

/// All calendar providers keyed by source, built once from config.
pub struct ProviderRegistry {
    providers: HashMap<CalendarSource, Arc<dyn CalendarProvider>>,
}

impl ProviderRegistry {
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        let mut providers: HashMap<CalendarSource, Arc<dyn CalendarProvider>> = HashMap::new();

        for format in [
            faireconomy::FeedFormat::Json,
            faireconomy::FeedFormat::Xml,
            faireconomy::FeedFormat::Ics,
        ] {
            let provider = faireconomy::FairEconomyProvider::new(
                client.clone(),
                config.faireconomy_base_url.clone(),
                format,
            );
            providers.insert(provider.source(), Arc::new(provider));
        }

        let fmp = fmp::FmpCalendarProvider::new(
            client.clone(),
            config.fmp_base_url.clone(),
            config.fmp_api_key.clone(),
        );
        providers.insert(CalendarSource::Fmp, Arc::new(fmp));

        let econdb =
            econdb::EconDbProvider::new(client, config.econdb_base_url.clone());
        providers.insert(CalendarSource::Econdb, Arc::new(econdb));

        Self { providers }
    }

    pub fn get(&self, source: CalendarSource) -> Option<Arc<dyn CalendarProvider>> {
        self.providers.get(&source).cloned()
    }
}
