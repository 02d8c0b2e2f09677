#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{LimitKind, Limits};
use crate::query;

fn date(d: u32, m: u32, y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(serial: u32, day: NaiveDate, category: &str, amount: Decimal, comment: &str) -> Expense {
    Expense {
        serial,
        date: day,
        category: category.into(),
        amount,
        comment: comment.into(),
    }
}

fn sample() -> Vec<Expense> {
    vec![
        expense(1, date(1, 1, 2024), "food", dec!(100), "lunch"),
        expense(2, date(1, 1, 2024), "travel", dec!(50), ""),
        expense(3, date(20, 1, 2024), "food", dec!(12.5), "snack"),
    ]
}

fn report() -> Report {
    Report::new("₹")
}

#[test]
fn test_listing_by_date() {
    let data = sample();
    let period = Period::Day(date(1, 1, 2024));
    let lines = report().listing(&period, &query::filter(&data, &period));
    assert_eq!(
        lines,
        vec![
            "Expenses on 01-01-2024:",
            "Serial Number: 1 | Date: 01-01-2024 | Category: food | Amount: ₹100.00 | Comment: lunch",
            "Serial Number: 2 | Date: 01-01-2024 | Category: travel | Amount: ₹50.00 | Comment: ",
        ]
    );
}

#[test]
fn test_listing_empty_messages() {
    let r = report();
    assert_eq!(
        r.listing(&Period::Day(date(2, 2, 2024)), &[]),
        vec!["No expenses recorded for this date."]
    );
    assert_eq!(
        r.listing(&Period::month_of(date(2, 2, 2024)), &[]),
        vec!["No expenses recorded for this month."]
    );
    assert_eq!(
        r.listing(&Period::Year(1999), &[]),
        vec!["No expenses recorded for this year."]
    );
}

#[test]
fn test_listing_month_header() {
    let data = sample();
    let period = Period::month_of(date(1, 1, 2024));
    let lines = report().listing(&period, &query::filter(&data, &period));
    assert_eq!(lines[0], "Expenses for January 2024:");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_total_scenario() {
    let data = sample();
    let period = Period::Day(date(1, 1, 2024));
    let total = query::period_total(&data, &period, &Limits::default());
    assert_eq!(
        report().total(&total),
        vec!["Total Expenses on 01-01-2024: ₹150.00"]
    );
}

#[test]
fn test_total_with_breach() {
    let data = sample();
    let limits = Limits {
        monthly: Some(dec!(100)),
        ..Default::default()
    };
    let period = Period::month_of(date(1, 1, 2024));
    let lines = report().total(&query::period_total(&data, &period, &limits));
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Total Expenses for January 2024: ₹162.50");
    assert!(lines[1].starts_with("Warning: You have exceeded your monthly spending limit!"));
}

#[test]
fn test_category_listing_day() {
    let data = sample();
    let period = Period::Day(date(1, 1, 2024));
    let lines = report().category_listing(&period, &query::list_by_category(&data, &period));
    assert_eq!(
        lines,
        vec![
            "Daily Expenses for 01-01-2024:",
            "",
            "Category: food",
            "1. Amount: ₹100.00 | Comment: lunch",
            "",
            "Category: travel",
            "1. Amount: ₹50.00 | Comment: ",
        ]
    );
}

#[test]
fn test_category_listing_month_includes_dates() {
    let data = sample();
    let period = Period::month_of(date(1, 1, 2024));
    let lines = report().category_listing(&period, &query::list_by_category(&data, &period));
    assert_eq!(lines[0], "Monthly Expenses for January 2024:");
    assert!(lines.contains(&"2. Date: 20-01-2024 | Amount: ₹12.50 | Comment: snack".to_string()));
}

#[test]
fn test_category_totals() {
    let data = sample();
    let lines = report().category_totals(&query::by_category(&data, &Period::Year(2024)));
    assert_eq!(
        lines,
        vec![
            "Total expense in food for 2024: ₹112.50",
            "Total expense in travel for 2024: ₹50.00",
        ]
    );
}

#[test]
fn test_category_totals_day_and_empty() {
    let data = sample();
    let r = report();
    let day = r.category_totals(&query::by_category(&data, &Period::Day(date(1, 1, 2024))));
    assert_eq!(day[0], "Total expense in food on 01-01-2024: ₹100.00");
    let none = r.category_totals(&query::by_category(&data, &Period::Year(2020)));
    assert_eq!(none, vec!["No expenses recorded for this year."]);
}

#[test]
fn test_breach_message() {
    let breach = LimitBreach {
        kind: LimitKind::Daily,
        period: Period::Day(date(2, 1, 2024)),
        limit: dec!(100),
        spent: dec!(120),
    };
    assert_eq!(
        report().breach(&breach),
        "Warning: You have exceeded your daily spending limit! (₹120.00 spent against ₹100.00 for 02-01-2024)"
    );
}

#[test]
fn test_load_summary_lists_skipped_lines() {
    let load = LoadReport {
        loaded: 2,
        skipped: vec![SkippedLine {
            line: 2,
            raw: "2|01-01-2024|food".into(),
            reason: "expected 5 fields, found 3".into(),
        }],
    };
    assert_eq!(
        report().load(&load),
        vec![
            "Issue loading line 2: 2|01-01-2024|food (expected 5 fields, found 3)",
            "Loaded 2 expenses (1 lines skipped).",
        ]
    );
}
