//! Unit tests for keyword category assignment

use macropulse::models::Category;
use macropulse::signals::assign_category;

#[test]
fn test_employment_titles() {
    assert_eq!(
        assign_category("Non-Farm Employment Change"),
        Category::Employment
    );
    assert_eq!(assign_category("Unemployment Claims"), Category::Employment);
    assert_eq!(assign_category("ADP Non-Farm Payrolls"), Category::Employment);
}

#[test]
fn test_inflation_titles() {
    assert_eq!(assign_category("Core CPI m/m"), Category::Inflation);
    assert_eq!(assign_category("PPI y/y"), Category::Inflation);
    assert_eq!(assign_category("Core PCE Price Index"), Category::Inflation);
}

#[test]
fn test_central_bank_titles() {
    assert_eq!(
        assign_category("FOMC Meeting Minutes"),
        Category::CentralBank
    );
    assert_eq!(
        assign_category("Official Cash Rate Decision"),
        Category::CentralBank
    );
}

#[test]
fn test_housing_titles() {
    assert_eq!(assign_category("Building Permits"), Category::Housing);
    assert_eq!(assign_category("Existing Home Sales"), Category::Housing);
}

#[test]
fn test_manufacturing_titles() {
    assert_eq!(
        assign_category("ISM Manufacturing PMI"),
        Category::Manufacturing
    );
    assert_eq!(
        assign_category("Industrial Production m/m"),
        Category::Manufacturing
    );
}

#[test]
fn test_trade_titles() {
    assert_eq!(assign_category("Trade Balance"), Category::Trade);
    assert_eq!(assign_category("Current Account"), Category::Trade);
}

#[test]
fn test_growth_titles() {
    assert_eq!(assign_category("Prelim GDP q/q"), Category::Growth);
    assert_eq!(assign_category("Core Retail Sales m/m"), Category::Growth);
}

#[test]
fn test_sentiment_titles() {
    assert_eq!(
        assign_category("CB Consumer Confidence"),
        Category::Sentiment
    );
    assert_eq!(
        assign_category("ZEW Economic Sentiment"),
        Category::Sentiment
    );
}

#[test]
fn test_unmatched_titles_land_in_other() {
    assert_eq!(assign_category("Crude Oil Inventories"), Category::Other);
    assert_eq!(assign_category(""), Category::Other);
}

#[test]
fn test_first_match_wins() {
    // "Employment" outranks "confidence" in the priority table, so a title
    // containing both still gets exactly one category.
    assert_eq!(
        assign_category("Employment Confidence Survey"),
        Category::Employment
    );
}

#[test]
fn test_matching_is_case_insensitive() {
    assert_eq!(assign_category("core cpi M/M"), Category::Inflation);
}
