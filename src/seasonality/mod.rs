//! Seasonal monthly-return computation over daily closes.
//!
//! Groups daily closes by (year, month), keeps the last close of each
//! month, computes percent change between adjacent entries of the
//! chronological monthly series, and averages per calendar month across
//! years. The year-by-month matrix feeds the heatmap view.

use chrono::Datelike;
use rand::Rng;

use crate::models::{DailyClose, SeasonalitySource, SeasonalityTable};

/// Minimum distinct years of monthly returns for a historical table.
/// Anything thinner is not seasonality, it is noise.
pub const MIN_YEARS: usize = 2;

/// Chronological (year, month, last close of month) series.
fn monthly_last_closes(closes: &[DailyClose]) -> Vec<(i32, u32, f64)> {
    let mut sorted: Vec<DailyClose> = closes.to_vec();
    sorted.sort_by_key(|c| c.date);

    let mut monthly: Vec<(i32, u32, f64)> = Vec::new();
    for close in sorted {
        let key = (close.date.year(), close.date.month());
        match monthly.last_mut() {
            Some(last) if (last.0, last.1) == key => last.2 = close.close,
            _ => monthly.push((key.0, key.1, close.close)),
        }
    }
    monthly
}

/// Compute the seasonality table from real history. Returns None when the
/// series covers fewer than [`MIN_YEARS`] distinct years; callers decide
/// whether that becomes an error or an explicit simulation.
pub fn compute(ticker: &str, closes: &[DailyClose]) -> Option<SeasonalityTable> {
    let monthly = monthly_last_closes(closes);

    let mut returns: Vec<(i32, u32, f64)> = Vec::new();
    for pair in monthly.windows(2) {
        let (_, _, prev) = pair[0];
        let (year, month, close) = pair[1];
        if prev != 0.0 {
            returns.push((year, month, (close - prev) / prev * 100.0));
        }
    }

    let mut years: Vec<i32> = returns.iter().map(|r| r.0).collect();
    years.sort_unstable();
    years.dedup();
    if years.len() < MIN_YEARS {
        return None;
    }

    let mut heatmap = vec![vec![None; 12]; years.len()];
    for (year, month, ret) in &returns {
        if let Some(row) = years.iter().position(|y| y == year) {
            heatmap[row][(*month - 1) as usize] = Some(*ret);
        }
    }

    Some(SeasonalityTable {
        ticker: ticker.to_string(),
        source: SeasonalitySource::Historical,
        curve: curve_from_heatmap(&heatmap),
        years,
        heatmap,
    })
}

/// Average each calendar-month column across years, skipping gaps.
fn curve_from_heatmap(heatmap: &[Vec<Option<f64>>]) -> Vec<Option<f64>> {
    (0..12)
        .map(|month| {
            let observed: Vec<f64> = heatmap.iter().filter_map(|row| row[month]).collect();
            if observed.is_empty() {
                None
            } else {
                Some(observed.iter().sum::<f64>() / observed.len() as f64)
            }
        })
        .collect()
}

/// Build a clearly-labelled simulated table for when real history is too
/// thin and the caller opted in. Values are uniform in ±3%, which is in
/// the ballpark of monthly index moves without pretending to be real.
pub fn simulate(ticker: &str, years: u32) -> SeasonalityTable {
    let mut rng = rand::thread_rng();
    let current_year = chrono::Utc::now().year();
    let span = years.max(MIN_YEARS as u32) as i32;
    let years_vec: Vec<i32> = ((current_year - span)..current_year).collect();

    let heatmap: Vec<Vec<Option<f64>>> = years_vec
        .iter()
        .map(|_| (0..12).map(|_| Some(rng.gen_range(-3.0..3.0))).collect())
        .collect();

    SeasonalityTable {
        ticker: ticker.to_string(),
        source: SeasonalitySource::Simulated,
        curve: curve_from_heatmap(&heatmap),
        years: years_vec,
        heatmap,
    }
}
