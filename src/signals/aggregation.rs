//! Category-based aggregation of per-event signals.

use std::collections::HashMap;

use crate::models::{Category, CategorySummary, EconomicEvent, Outlook, OutlookLabel};

/// A summed signal above this is Bullish (exclusive).
pub const BULLISH_MIN: i64 = 2;
/// A summed signal below this is Bearish (exclusive).
pub const BEARISH_MAX: i64 = -2;

/// Label a summed signal against the fixed thresholds.
pub fn label_for(total: i64) -> OutlookLabel {
    if total > BULLISH_MIN {
        OutlookLabel::Bullish
    } else if total < BEARISH_MAX {
        OutlookLabel::Bearish
    } else {
        OutlookLabel::Neutral
    }
}

/// Aggregate scores by category
pub struct Aggregator;

impl Aggregator {
    /// Sum signals per category and across the whole table. Only
    /// categories with at least one event appear in the output; the same
    /// thresholds label each category and the grand total.
    pub fn aggregate(events: &[EconomicEvent]) -> Outlook {
        let mut sums: HashMap<Category, (i64, usize)> = HashMap::new();
        for event in events {
            let entry = sums.entry(event.category).or_insert((0, 0));
            entry.0 += event.signal as i64;
            entry.1 += 1;
        }

        // Iterate in the fixed Category order so output is deterministic.
        let categories: Vec<CategorySummary> = Category::all()
            .into_iter()
            .filter_map(|category| {
                sums.get(&category).map(|&(total, count)| CategorySummary {
                    category,
                    events: count,
                    total,
                    label: label_for(total),
                })
            })
            .collect();

        let total: i64 = categories.iter().map(|c| c.total).sum();

        Outlook {
            event_count: events.len(),
            total,
            label: label_for(total),
            categories,
        }
    }
}
