//! Macropulse: macro-economic calendar signal engine.
//!
//! Fetches economic calendar releases from public feeds, cleans the
//! string-encoded values, scores each release against its forecast, and
//! serves the scored table, category outlook, and price seasonality over
//! an HTTP API with CSV export.

pub mod cache;
pub mod config;
pub mod core;
pub mod export;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod parsing;
pub mod seasonality;
pub mod services;
pub mod signals;
