//! Aggregated outlook labels for categories and the whole window.

use serde::{Deserialize, Serialize};

use crate::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlookLabel {
    Bullish,
    Neutral,
    Bearish,
}

impl OutlookLabel {
    pub fn label(self) -> &'static str {
        match self {
            OutlookLabel::Bullish => "Bullish",
            OutlookLabel::Neutral => "Neutral",
            OutlookLabel::Bearish => "Bearish",
        }
    }
}

/// Per-category signal sum with its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub events: usize,
    pub total: i64,
    pub label: OutlookLabel,
}

/// The full aggregation: one summary per populated category plus the
/// grand-total label across all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outlook {
    pub categories: Vec<CategorySummary>,
    pub event_count: usize,
    pub total: i64,
    pub label: OutlookLabel,
}
