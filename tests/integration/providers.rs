//! Integration tests for the calendar and price providers
//!
//! Each provider is exercised directly against a wiremock upstream with a
//! fixed November 2024 window, so the fixtures can use literal dates.

use std::time::Duration;

use chrono::NaiveDate;
use macropulse::models::{Category, Impact};
use macropulse::services::econdb::EconDbProvider;
use macropulse::services::faireconomy::{FairEconomyProvider, FeedFormat};
use macropulse::services::fmp::FmpCalendarProvider;
use macropulse::services::prices::FmpPriceProvider;
use macropulse::services::{
    build_http_client, CalendarProvider, FetchError, FetchWindow, PriceProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn november_window() -> FetchWindow {
    FetchWindow::new(
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
    )
}

fn client() -> reqwest::Client {
    build_http_client(Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn faireconomy_json_parses_and_enriches() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ff_calendar_thisweek.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[
                {
                    "title": "Core CPI m/m",
                    "country": "USD",
                    "date": "2024-11-18T13:30:00Z",
                    "impact": "High",
                    "actual": "3.1%",
                    "forecast": "2.8%",
                    "previous": "2.6%"
                },
                {
                    "title": "Non-Farm Employment Change",
                    "country": "USD",
                    "date": "2024-12-06T13:30:00Z",
                    "impact": "High",
                    "actual": "227K",
                    "forecast": "218K",
                    "previous": "36K"
                }
            ]"#,
        ))
        .mount(&upstream)
        .await;

    let provider = FairEconomyProvider::new(client(), upstream.uri(), FeedFormat::Json);
    let events = provider.fetch_events(november_window()).await.unwrap();

    // The December row falls outside the window.
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.report, "Core CPI m/m");
    assert_eq!(event.impact, Impact::High);
    assert_eq!(event.category, Category::Inflation);
    assert_eq!(event.actual, Some(3.1));
    assert_eq!(event.forecast, Some(2.8));
    assert_eq!(event.signal, 1);
    assert_eq!(event.actual_raw.as_deref(), Some("3.1%"));
}

#[tokio::test]
async fn faireconomy_xml_combines_split_date_and_time() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ff_calendar_thisweek.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<weeklyevents>
    <event>
        <title>Unemployment Claims</title>
        <country>USD</country>
        <date>11-18-2024</date>
        <time>2:00am</time>
        <impact>Medium</impact>
        <actual>213K</actual>
        <forecast>215K</forecast>
        <previous>220K</previous>
    </event>
</weeklyevents>"#,
        ))
        .mount(&upstream)
        .await;

    let provider = FairEconomyProvider::new(client(), upstream.uri(), FeedFormat::Xml);
    let events = provider.fetch_events(november_window()).await.unwrap();

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.report, "Unemployment Claims");
    assert_eq!(event.date.format("%Y-%m-%d %H:%M").to_string(), "2024-11-18 02:00");
    assert_eq!(event.category, Category::Employment);
    assert_eq!(event.signal, -1); // claims came in below forecast
}

#[tokio::test]
async fn faireconomy_ics_unpacks_description_fields() {
    let upstream = MockServer::start().await;
    let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Core CPI m/m\r\n\
DTSTART:20241118T133000Z\r\n\
LOCATION:USD\r\n\
DESCRIPTION:Impact: High\\nActual: 3.1%\\nForecast: 2.8%\\nPrevious: 2\r\n\
\x20.6%\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    Mock::given(method("GET"))
        .and(path("/ff_calendar_thisweek.ics"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ics))
        .mount(&upstream)
        .await;

    let provider = FairEconomyProvider::new(client(), upstream.uri(), FeedFormat::Ics);
    let events = provider.fetch_events(november_window()).await.unwrap();

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.report, "Core CPI m/m");
    assert_eq!(event.country.as_deref(), Some("USD"));
    assert_eq!(event.impact, Impact::High);
    assert_eq!(event.actual, Some(3.1));
    assert_eq!(event.forecast, Some(2.8));
    // The folded continuation line rejoins "2" + ".6%".
    assert_eq!(event.previous_raw.as_deref(), Some("2.6%"));
    assert_eq!(event.signal, 1);
}

#[tokio::test]
async fn faireconomy_ics_rejects_non_calendar_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ff_calendar_thisweek.ics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&upstream)
        .await;

    let provider = FairEconomyProvider::new(client(), upstream.uri(), FeedFormat::Ics);
    let err = provider.fetch_events(november_window()).await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn fmp_normalizes_numeric_values() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/economic_calendar"))
        .and(query_param("from", "2024-11-01"))
        .and(query_param("to", "2024-11-30"))
        .and(query_param("apikey", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "date": "2024-11-18 13:30:00",
                "event": "Retail Sales m/m",
                "country": "US",
                "actual": 0.7,
                "estimate": 0.3,
                "previous": null,
                "impact": "High"
            },
            {
                "date": "2024-11-19 13:30:00",
                "event": "Building Permits",
                "country": "US",
                "actual": null,
                "estimate": 1.43,
                "previous": 1.425,
                "impact": "Low"
            }
        ])))
        .mount(&upstream)
        .await;

    let provider = FmpCalendarProvider::new(client(), upstream.uri(), "test".to_string());
    let events = provider.fetch_events(november_window()).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].actual_raw.as_deref(), Some("0.7"));
    assert_eq!(events[0].signal, 1);
    assert_eq!(events[1].actual, None);
    assert_eq!(events[1].signal, 0); // missing actual scores neutral
    assert_eq!(events[1].category, Category::Housing);
}

#[tokio::test]
async fn econdb_maps_importance_ranks() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calendar/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {
                    "date": "2024-11-18",
                    "indicator": "CPI YoY",
                    "country": "US",
                    "actual": "2.6",
                    "consensus": "2.5",
                    "previous": "2.4",
                    "importance": 3
                },
                {
                    "date": "2024-11-19",
                    "indicator": "Housing Starts",
                    "country": "US",
                    "actual": "1.31",
                    "consensus": "1.34",
                    "previous": "1.35",
                    "importance": 1
                }
            ]
        })))
        .mount(&upstream)
        .await;

    let provider = EconDbProvider::new(client(), upstream.uri());
    let events = provider.fetch_events(november_window()).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].impact, Impact::High);
    assert_eq!(events[0].signal, 1);
    assert_eq!(events[1].impact, Impact::Low);
    assert_eq!(events[1].signal, -1);
}

#[tokio::test]
async fn upstream_failure_is_a_status_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calendar/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;

    let provider = EconDbProvider::new(client(), upstream.uri());
    let err = provider.fetch_events(november_window()).await.unwrap_err();
    assert!(matches!(err, FetchError::UpstreamStatus(503)));
}

#[tokio::test]
async fn slow_upstream_is_a_timeout_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ff_calendar_thisweek.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&upstream)
        .await;

    let short_client = build_http_client(Duration::from_secs(1)).unwrap();
    let provider = FairEconomyProvider::new(short_client, upstream.uri(), FeedFormat::Json);
    let err = provider.fetch_events(november_window()).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout), "got {:?}", err);
}

#[tokio::test]
async fn prices_parse_and_sort_daily_closes() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/historical-price-full/EURUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "symbol": "EURUSD",
            "historical": [
                { "date": "2024-11-19", "close": 1.06 },
                { "date": "2024-11-18", "close": 1.05 }
            ]
        })))
        .mount(&upstream)
        .await;

    let provider = FmpPriceProvider::new(client(), upstream.uri(), "test".to_string());
    let closes = provider.fetch_daily_closes("EURUSD", 5).await.unwrap();

    assert_eq!(closes.len(), 2);
    assert!(closes[0].date < closes[1].date, "closes come back sorted");
    assert_eq!(closes[0].close, 1.05);
}

#[tokio::test]
async fn prices_empty_history_is_a_typed_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/historical-price-full/EURUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "symbol": "EURUSD",
            "historical": []
        })))
        .mount(&upstream)
        .await;

    let provider = FmpPriceProvider::new(client(), upstream.uri(), "test".to_string());
    let err = provider.fetch_daily_closes("EURUSD", 5).await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyDataset));
}
