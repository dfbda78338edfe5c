//! Signal derivation: scoring, category assignment, aggregation.

pub mod aggregation;
pub mod categories;
pub mod scoring;

pub use aggregation::Aggregator;
pub use categories::assign_category;
pub use scoring::score;

use crate::models::EconomicEvent;

/// Derive category and signal for freshly fetched events.
pub fn enrich(events: &mut [EconomicEvent]) {
    for event in events.iter_mut() {
        event.category = categories::assign_category(&event.report);
        event.signal = scoring::score(event.actual, event.forecast);
    }
}

/// Rescore without reassigning categories; manual uploads carry their own.
pub fn rescore(events: &mut [EconomicEvent]) {
    for event in events.iter_mut() {
        event.signal = scoring::score(event.actual, event.forecast);
    }
}
