//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::cache::CalendarCache;
use crate::config::Config;
use crate::export;
use crate::metrics::Metrics;
use crate::models::{EconomicEvent, Impact, SeasonalityTable};
use crate::seasonality;
use crate::services::{
    self, local, prices::FmpPriceProvider, CalendarSource, FetchError, FetchWindow,
    PriceProvider, ProviderRegistry,
};
use crate::signals::Aggregator;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub providers: Arc<ProviderRegistry>,
    pub prices: Arc<dyn PriceProvider>,
    pub cache: Arc<CalendarCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let client = services::build_http_client(config.http_timeout)?;
        let providers = Arc::new(ProviderRegistry::from_config(&config, client.clone()));
        let prices: Arc<dyn PriceProvider> = Arc::new(FmpPriceProvider::new(
            client,
            config.fmp_base_url.clone(),
            config.fmp_api_key.clone(),
        ));

        Ok(Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: Arc::new(Metrics::new()?),
            start_time: Arc::new(Instant::now()),
            providers,
            prices,
            cache: Arc::new(CalendarCache::new(config.cache_ttl)),
            config: Arc::new(config),
        })
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "macropulse-calendar-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

type ApiError = (StatusCode, Json<Value>);

/// Map a typed fetch failure to a status and a diagnostic body. Distinct
/// causes get distinct statuses so clients can tell a dead upstream from a
/// bad upload from an empty dataset.
fn fetch_error_response(err: FetchError) -> ApiError {
    let status = match &err {
        FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        FetchError::UpstreamStatus(_) | FetchError::Network(_) | FetchError::Malformed(_) => {
            StatusCode::BAD_GATEWAY
        }
        FetchError::EmptyDataset => StatusCode::NOT_FOUND,
        FetchError::MissingColumn(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (
        status,
        Json(json!({
            "error": err.to_string(),
            "kind": err.kind(),
        })),
    )
}

#[derive(Debug, Deserialize)]
struct CalendarQuery {
    window_days: Option<i64>,
    min_impact: Option<u8>,
    source: Option<CalendarSource>,
}

struct CalendarMeta {
    source: CalendarSource,
    window: FetchWindow,
    fetched_at: chrono::DateTime<chrono::Utc>,
    cache_hit: bool,
}

impl CalendarMeta {
    fn to_json(&self, event_count: usize) -> Value {
        json!({
            "source": self.source.as_str(),
            "from": self.window.from.to_string(),
            "to": self.window.to.to_string(),
            "fetched_at": self.fetched_at.to_rfc3339(),
            "cache_hit": self.cache_hit,
            "event_count": event_count,
        })
    }
}

/// Read-through load: serve fresh cached events when available, otherwise
/// fetch from the selected provider and cache the result. Impact filtering
/// happens after the cache so the cache holds the full table.
async fn load_calendar(
    state: &AppState,
    query: &CalendarQuery,
) -> Result<(Vec<EconomicEvent>, CalendarMeta), FetchError> {
    let source = query.source.unwrap_or(state.config.default_source);
    let window =
        FetchWindow::trailing(query.window_days.unwrap_or(state.config.default_window_days));
    let key = CalendarCache::key(source, window);

    let (events, fetched_at, cache_hit) = match state.cache.get(&key).await {
        Some((events, fetched_at)) => {
            state.metrics.cache_hits_total.inc();
            (events, fetched_at, true)
        }
        None => {
            let provider = state.providers.get(source).ok_or_else(|| {
                FetchError::Network(format!("no provider registered for {}", source.as_str()))
            })?;

            state.metrics.calendar_fetches_total.inc();
            let events = match provider.fetch_events(window).await {
                Ok(events) => events,
                Err(err) => {
                    state.metrics.calendar_fetch_failures_total.inc();
                    error!(
                        source = source.as_str(),
                        kind = err.kind(),
                        error = %err,
                        "calendar fetch failed"
                    );
                    return Err(err);
                }
            };
            let fetched_at = state.cache.put(key, events.clone()).await;
            (events, fetched_at, false)
        }
    };

    let min_impact = query.min_impact.unwrap_or(1);
    let events: Vec<EconomicEvent> = events
        .into_iter()
        .filter(|e| e.impact >= Impact::from_rank(i64::from(min_impact)))
        .collect();

    Ok((
        events,
        CalendarMeta {
            source,
            window,
            fetched_at,
            cache_hit,
        },
    ))
}

/// Scored event table for the requested window.
async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Value>, ApiError> {
    let (events, meta) = load_calendar(&state, &query)
        .await
        .map_err(fetch_error_response)?;
    Ok(Json(json!({
        "meta": meta.to_json(events.len()),
        "events": events,
    })))
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

fn export_error(err: csv::Error) -> ApiError {
    error!(error = %err, "CSV export failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "export failed", "kind": "export" })),
    )
}

/// Event table as a CSV download.
async fn export_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Response, ApiError> {
    let (events, _) = load_calendar(&state, &query)
        .await
        .map_err(fetch_error_response)?;
    let body = export::events_to_csv(&events).map_err(export_error)?;
    Ok(csv_response("calendar.csv", body))
}

/// Per-category outlook plus the overall label.
async fn get_outlook(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Value>, ApiError> {
    let (events, meta) = load_calendar(&state, &query)
        .await
        .map_err(fetch_error_response)?;
    let outlook = Aggregator::aggregate(&events);
    Ok(Json(json!({
        "meta": meta.to_json(events.len()),
        "outlook": outlook,
    })))
}

/// Category summary as a CSV download.
async fn export_outlook(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Response, ApiError> {
    let (events, _) = load_calendar(&state, &query)
        .await
        .map_err(fetch_error_response)?;
    let outlook = Aggregator::aggregate(&events);
    let body = export::outlook_to_csv(&outlook).map_err(export_error)?;
    Ok(csv_response("outlook.csv", body))
}

/// Manual data source: the posted body is a delimited table with the fixed
/// required columns. Never touches the network.
async fn post_manual_calendar(body: String) -> Result<Json<Value>, ApiError> {
    let events = local::parse_manual_csv(&body).map_err(fetch_error_response)?;
    let outlook = Aggregator::aggregate(&events);
    Ok(Json(json!({
        "meta": { "source": "manual", "event_count": events.len() },
        "events": events,
        "outlook": outlook,
    })))
}

#[derive(Debug, Deserialize)]
struct SeasonalityQuery {
    years: Option<u32>,
    /// Explicit opt-in to the simulated fallback when history is too thin.
    simulate: Option<bool>,
}

/// Seasonal curve and year-by-month heatmap for a ticker. Simulated data
/// is only served on explicit request and is labelled as such.
async fn get_seasonality(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<SeasonalityQuery>,
) -> Result<Json<SeasonalityTable>, ApiError> {
    let years = query.years.unwrap_or(state.config.seasonality_years);
    let simulate = query.simulate.unwrap_or(false);

    let table = match state.prices.fetch_daily_closes(&ticker, years).await {
        Ok(closes) => seasonality::compute(&ticker, &closes),
        Err(FetchError::EmptyDataset) => None,
        Err(err) => {
            error!(ticker = %ticker, kind = err.kind(), error = %err, "price fetch failed");
            return Err(fetch_error_response(err));
        }
    };

    match table {
        Some(table) => Ok(Json(table)),
        None if simulate => {
            warn!(
                ticker = %ticker,
                "insufficient history, serving simulated seasonality as requested"
            );
            Ok(Json(seasonality::simulate(&ticker, years)))
        }
        None => Err(fetch_error_response(FetchError::EmptyDataset)),
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/calendar", get(get_calendar))
        .route("/api/calendar/export", get(export_calendar))
        .route("/api/calendar/manual", post(post_manual_calendar))
        .route("/api/outlook", get(get_outlook))
        .route("/api/outlook/export", get(export_outlook))
        .route("/api/seasonality/{ticker}", get(get_seasonality))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::from_config(config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
