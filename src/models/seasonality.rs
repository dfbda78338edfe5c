//! Seasonality table for a price series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close from the price provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: f64,
}

/// Whether a seasonality table comes from real history or from the
/// explicitly requested simulation fallback. Surfaced verbatim in the API
/// payload so simulated output is never mistaken for history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalitySource {
    Historical,
    Simulated,
}

/// Average monthly return curve plus the year-by-month heatmap behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityTable {
    pub ticker: String,
    pub source: SeasonalitySource,
    /// Years contributing rows to the heatmap, ascending.
    pub years: Vec<i32>,
    /// Average percent change per calendar month (index 0 = January);
    /// None where no year contributed an observation.
    pub curve: Vec<Option<f64>>,
    /// Monthly percent change per year, rows aligned with `years`,
    /// columns January..December.
    pub heatmap: Vec<Vec<Option<f64>>>,
}
