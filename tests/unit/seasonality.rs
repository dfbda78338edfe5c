//! Unit tests for the seasonal monthly-return computation

use chrono::NaiveDate;
use macropulse::models::{DailyClose, SeasonalitySource};
use macropulse::seasonality::{compute, simulate, MIN_YEARS};

fn close(year: i32, month: u32, day: u32, close: f64) -> DailyClose {
    DailyClose {
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        close,
    }
}

#[test]
fn test_two_year_curve_averages_per_calendar_month() {
    let closes = vec![
        close(2022, 1, 31, 100.0),
        close(2022, 2, 28, 120.0), // Feb 2022: +20%
        close(2023, 1, 31, 100.0), // Jan 2023: -16.67% off Feb 2022
        close(2023, 2, 28, 150.0), // Feb 2023: +50%
    ];

    let table = compute("DXY", &closes).unwrap();
    assert_eq!(table.source, SeasonalitySource::Historical);
    assert_eq!(table.years, vec![2022, 2023]);

    // February curve point is the average of the two yearly returns.
    let feb = table.curve[1].unwrap();
    assert!((feb - 35.0).abs() < 1e-9, "feb = {}", feb);

    // January only has a 2023 observation.
    let jan = table.curve[0].unwrap();
    assert!((jan - (100.0 - 120.0) / 120.0 * 100.0).abs() < 1e-9);

    // Months with no observations stay empty.
    assert_eq!(table.curve[5], None);
}

#[test]
fn test_heatmap_rows_align_with_years() {
    let closes = vec![
        close(2022, 1, 31, 100.0),
        close(2022, 2, 28, 120.0),
        close(2023, 1, 31, 100.0),
        close(2023, 2, 28, 150.0),
    ];

    let table = compute("DXY", &closes).unwrap();
    assert_eq!(table.heatmap.len(), 2);
    assert!((table.heatmap[0][1].unwrap() - 20.0).abs() < 1e-9);
    assert!((table.heatmap[1][1].unwrap() - 50.0).abs() < 1e-9);
    // The first monthly close has no predecessor, so no Jan 2022 return.
    assert_eq!(table.heatmap[0][0], None);
}

#[test]
fn test_last_close_of_month_wins() {
    let closes = vec![
        close(2022, 1, 5, 90.0),
        close(2022, 1, 31, 100.0), // last close of Jan
        close(2022, 2, 28, 110.0),
        close(2023, 2, 28, 121.0),
    ];

    let table = compute("DXY", &closes).unwrap();
    // Feb 2022 return computed off 100, not 90.
    assert!((table.heatmap[0][1].unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn test_unsorted_input_is_handled() {
    let closes = vec![
        close(2023, 2, 28, 150.0),
        close(2022, 1, 31, 100.0),
        close(2023, 1, 31, 100.0),
        close(2022, 2, 28, 120.0),
    ];

    let table = compute("DXY", &closes).unwrap();
    assert!((table.curve[1].unwrap() - 35.0).abs() < 1e-9);
}

#[test]
fn test_thin_history_yields_none() {
    // A single year of returns is below MIN_YEARS.
    assert!(MIN_YEARS >= 2);
    let closes = vec![
        close(2023, 1, 31, 100.0),
        close(2023, 2, 28, 110.0),
        close(2023, 3, 31, 120.0),
    ];
    assert!(compute("DXY", &closes).is_none());
}

#[test]
fn test_empty_history_yields_none() {
    assert!(compute("DXY", &[]).is_none());
}

#[test]
fn test_simulated_table_is_labelled() {
    let table = simulate("DXY", 5);
    assert_eq!(table.source, SeasonalitySource::Simulated);
    assert_eq!(table.years.len(), 5);
    assert_eq!(table.curve.len(), 12);
    for month in &table.curve {
        let value = month.unwrap();
        assert!(value > -3.0 && value < 3.0, "value {} out of range", value);
    }
    for row in &table.heatmap {
        assert_eq!(row.len(), 12);
    }
}
