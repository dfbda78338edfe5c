//! Daily close history from the FMP historical-price endpoint.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::models::DailyClose;
use crate::services::{FetchError, PriceProvider};

#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    #[serde(default)]
    historical: Vec<HistoricalBar>,
}

#[derive(Debug, Deserialize)]
struct HistoricalBar {
    date: String,
    close: f64,
}

pub struct FmpPriceProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FmpPriceProvider {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl PriceProvider for FmpPriceProvider {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        years: u32,
    ) -> Result<Vec<DailyClose>, FetchError> {
        let from = Utc::now().date_naive() - Duration::days(i64::from(years) * 365);
        let url = format!(
            "{}/api/v3/historical-price-full/{}?serietype=line&from={}&apikey={}",
            self.base_url.trim_end_matches('/'),
            ticker,
            from,
            self.api_key
        );
        let response = self.client.get(&url).send().await.map_err(FetchError::from)?;
        if !response.status().is_success() {
            return Err(FetchError::UpstreamStatus(response.status().as_u16()));
        }
        let body = response.text().await.map_err(FetchError::from)?;
        let parsed: HistoricalResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut closes: Vec<DailyClose> = parsed
            .historical
            .into_iter()
            .filter_map(|bar| {
                let date = NaiveDate::parse_from_str(&bar.date, "%Y-%m-%d").ok()?;
                Some(DailyClose {
                    date,
                    close: bar.close,
                })
            })
            .collect();
        closes.sort_by_key(|c| c.date);

        if closes.is_empty() {
            return Err(FetchError::EmptyDataset);
        }

        debug!(
            ticker = ticker,
            count = closes.len(),
            "fetched {} daily closes for {}",
            closes.len(),
            ticker
        );
        Ok(closes)
    }
}
