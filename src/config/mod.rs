//! Environment-driven configuration.
//!
//! All runtime knobs come from environment variables (loaded from `.env` at
//! the binary edge via dotenvy) with sensible defaults, so the service runs
//! unconfigured against the public feeds.

use std::env;
use std::time::Duration;

use crate::services::CalendarSource;

/// Deployment environment name ("production" switches logging to JSON).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// HTTP listen port.
pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Calendar source used when the request does not name one.
    pub default_source: CalendarSource,
    /// Lookback window in days when the request does not name one.
    pub default_window_days: i64,
    /// Timeout applied to every upstream request.
    pub http_timeout: Duration,
    /// Freshness window for the read-through calendar cache.
    pub cache_ttl: Duration,
    pub faireconomy_base_url: String,
    pub fmp_base_url: String,
    pub econdb_base_url: String,
    pub fmp_api_key: String,
    /// Years of daily closes pulled for the seasonality view.
    pub seasonality_years: u32,
    /// Default price-based dollar proxy for seasonality.
    pub seasonality_ticker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_source: CalendarSource::Faireconomy,
            default_window_days: 7,
            http_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
            faireconomy_base_url: "https://nfs.faireconomy.media".to_string(),
            fmp_base_url: "https://financialmodelingprep.com".to_string(),
            econdb_base_url: "https://www.econdb.com".to_string(),
            fmp_api_key: "demo".to_string(),
            seasonality_years: 5,
            seasonality_ticker: "DXY".to_string(),
        }
    }
}

impl Config {
    /// Build a config from the process environment, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_source = env::var("DEFAULT_CALENDAR_SOURCE")
            .ok()
            .and_then(|s| CalendarSource::parse(&s))
            .unwrap_or(defaults.default_source);

        Self {
            default_source,
            default_window_days: env_i64("DEFAULT_WINDOW_DAYS", defaults.default_window_days),
            http_timeout: Duration::from_secs(env_u64(
                "HTTP_TIMEOUT_SECONDS",
                defaults.http_timeout.as_secs(),
            )),
            cache_ttl: Duration::from_secs(env_u64(
                "CACHE_TTL_SECONDS",
                defaults.cache_ttl.as_secs(),
            )),
            faireconomy_base_url: env_string(
                "FAIRECONOMY_BASE_URL",
                &defaults.faireconomy_base_url,
            ),
            fmp_base_url: env_string("FMP_BASE_URL", &defaults.fmp_base_url),
            econdb_base_url: env_string("ECONDB_BASE_URL", &defaults.econdb_base_url),
            fmp_api_key: env_string("FMP_API_KEY", &defaults.fmp_api_key),
            seasonality_years: env_u64("SEASONALITY_YEARS", defaults.seasonality_years as u64)
                as u32,
            seasonality_ticker: env_string("SEASONALITY_TICKER", &defaults.seasonality_ticker),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
