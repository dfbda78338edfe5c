//! Shared data models spanning the engine layers.

pub mod event;
pub mod outlook;
pub mod seasonality;

pub use event::{Category, EconomicEvent, Impact};
pub use outlook::{CategorySummary, Outlook, OutlookLabel};
pub use seasonality::{DailyClose, SeasonalitySource, SeasonalityTable};
