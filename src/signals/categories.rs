//! Keyword-based category assignment for release titles.

use crate::models::Category;

/// Priority-ordered keyword table. The first matching entry wins, which
/// keeps the invariant that an event has at most one category.
const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Employment,
        &[
            "employment",
            "unemployment",
            "payroll",
            "jobless",
            "jobs",
            "claims",
            "labor cost",
        ],
    ),
    (
        Category::Inflation,
        &["cpi", "ppi", "inflation", "price index", "pce", "deflator"],
    ),
    (
        Category::CentralBank,
        &[
            "rate decision",
            "interest rate",
            "fomc",
            "monetary policy",
            "meeting minutes",
            "press conference",
        ],
    ),
    (
        Category::Housing,
        &[
            "housing",
            "home sales",
            "building permits",
            "mortgage",
            "construction spending",
        ],
    ),
    (
        Category::Manufacturing,
        &[
            "manufacturing",
            "industrial production",
            "factory orders",
            "durable goods",
            "pmi",
            "ism",
        ],
    ),
    (
        Category::Trade,
        &["trade balance", "exports", "imports", "current account"],
    ),
    (
        Category::Growth,
        &["gdp", "retail sales", "personal income", "personal spending"],
    ),
    (
        Category::Sentiment,
        &["confidence", "sentiment", "expectations", "optimism"],
    ),
];

/// Match a report title to its category; unmatched titles land in Other.
pub fn assign_category(report: &str) -> Category {
    let lowered = report.to_lowercase();
    for (category, keywords) in KEYWORDS {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return *category;
        }
    }
    Category::Other
}
