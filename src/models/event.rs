//! Economic calendar event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsing;

/// Upstream impact rating on the usual 1-3 ordinal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn rank(self) -> u8 {
        match self {
            Impact::Low => 1,
            Impact::Medium => 2,
            Impact::High => 3,
        }
    }

    pub fn from_rank(rank: i64) -> Self {
        match rank {
            r if r >= 3 => Impact::High,
            2 => Impact::Medium,
            _ => Impact::Low,
        }
    }

    /// Map the provider label strings ("High", "Medium Impact Expected",
    /// "3", ...) onto the ordinal scale. Anything unrecognized is Low.
    pub fn from_label(label: &str) -> Self {
        let lowered = label.trim().to_lowercase();
        if lowered.contains("high") || lowered == "3" {
            Impact::High
        } else if lowered.contains("med") || lowered == "2" {
            Impact::Medium
        } else {
            Impact::Low
        }
    }
}

/// Report category, derived by keyword match or taken from a manual upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Employment,
    Inflation,
    Growth,
    Housing,
    Manufacturing,
    CentralBank,
    Trade,
    Sentiment,
    Other,
}

impl Category {
    pub fn all() -> [Category; 9] {
        [
            Category::Employment,
            Category::Inflation,
            Category::Growth,
            Category::Housing,
            Category::Manufacturing,
            Category::CentralBank,
            Category::Trade,
            Category::Sentiment,
            Category::Other,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Employment => "Employment",
            Category::Inflation => "Inflation",
            Category::Growth => "Growth",
            Category::Housing => "Housing",
            Category::Manufacturing => "Manufacturing",
            Category::CentralBank => "Central Bank",
            Category::Trade => "Trade",
            Category::Sentiment => "Sentiment",
            Category::Other => "Other",
        }
    }

    /// Lenient label lookup for manual uploads; unknown labels land in Other.
    pub fn from_label(label: &str) -> Self {
        let lowered = label.trim().to_lowercase();
        Category::all()
            .into_iter()
            .find(|c| c.label().to_lowercase() == lowered)
            .unwrap_or(Category::Other)
    }
}

/// One calendar release with raw upstream strings preserved next to their
/// cleaned numeric counterparts, plus the derived category and signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub date: DateTime<Utc>,
    pub report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_raw: Option<String>,
    pub actual: Option<f64>,
    pub forecast: Option<f64>,
    pub previous: Option<f64>,
    pub category: Category,
    pub signal: i32,
}

impl EconomicEvent {
    pub fn new(date: DateTime<Utc>, report: impl Into<String>) -> Self {
        Self {
            date,
            report: report.into(),
            country: None,
            impact: Impact::Low,
            actual_raw: None,
            forecast_raw: None,
            previous_raw: None,
            actual: None,
            forecast: None,
            previous: None,
            category: Category::Other,
            signal: 0,
        }
    }

    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = impact;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Attach the raw value strings and derive their cleaned floats.
    pub fn with_values(
        mut self,
        actual: Option<String>,
        forecast: Option<String>,
        previous: Option<String>,
    ) -> Self {
        self.actual = actual.as_deref().and_then(parsing::clean_numeric);
        self.forecast = forecast.as_deref().and_then(parsing::clean_numeric);
        self.previous = previous.as_deref().and_then(parsing::clean_numeric);
        self.actual_raw = actual.filter(|s| !s.trim().is_empty());
        self.forecast_raw = forecast.filter(|s| !s.trim().is_empty());
        self.previous_raw = previous.filter(|s| !s.trim().is_empty());
        self
    }
}
