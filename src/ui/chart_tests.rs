#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use rust_decimal_macros::dec;

use crate::models::{Expense, Period};
use crate::query;

fn expense(serial: u32, d: u32, m: u32, category: &str, amount: Decimal) -> Expense {
    Expense {
        serial,
        date: NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
        category: category.into(),
        amount,
        comment: String::new(),
    }
}

fn sample() -> Vec<Expense> {
    vec![
        expense(1, 1, 1, "food", dec!(75)),
        expense(2, 2, 1, "travel", dec!(25)),
        expense(3, 5, 3, "food", dec!(0.5)),
    ]
}

fn screen_text(chart: &Chart) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal.draw(|f| draw(f, chart, "₹")).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn test_share_chart_from_breakdown() {
    let data = sample();
    let chart = Chart::share_of(&query::by_category(
        &data,
        &Period::Month {
            year: 2024,
            month: 1,
        },
    ));
    assert_eq!(chart.kind, ChartKind::Share);
    assert_eq!(chart.title, "Expense Summary for January 2024");
    assert_eq!(
        chart.points,
        vec![("food".to_string(), dec!(75)), ("travel".to_string(), dec!(25))]
    );
    assert_eq!(chart.total(), dec!(100));
}

#[test]
fn test_month_chart_from_breakdown() {
    let data = sample();
    let chart = Chart::months_of(&query::by_month(&data, 2024));
    assert_eq!(chart.kind, ChartKind::Bars);
    assert_eq!(chart.title, "Monthly Expenses for 2024");
    let labels: Vec<&str> = chart.points.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["January", "March"]);
}

#[test]
fn test_bar_value_in_cents() {
    assert_eq!(bar_value(dec!(0.5)), 50);
    assert_eq!(bar_value(dec!(12.345)), 1234);
    assert_eq!(bar_value(Decimal::ZERO), 0);
}

#[test]
fn test_share_bars_one_per_point() {
    let data = sample();
    let chart = Chart::share_of(&query::by_category(&data, &Period::Year(2024)));
    assert_eq!(share_bars(&chart, "₹").len(), 2);
    assert_eq!(month_bars(&chart, "₹").len(), 2);
}

#[test]
fn test_draw_share_chart_shows_labels() {
    let data = sample();
    let chart = Chart::share_of(&query::by_category(
        &data,
        &Period::Month {
            year: 2024,
            month: 1,
        },
    ));
    let text = screen_text(&chart);
    assert!(text.contains("Expense Summary for January 2024"));
    assert!(text.contains("food 75.0%"));
    assert!(text.contains("travel 25.0%"));
    assert!(text.contains("press any key"));
}

#[test]
fn test_draw_month_chart_shows_months() {
    let data = sample();
    let chart = Chart::months_of(&query::by_month(&data, 2024));
    let text = screen_text(&chart);
    assert!(text.contains("Monthly Expenses for 2024"));
    assert!(text.contains("January"));
    assert!(text.contains("March"));
}

#[test]
fn test_first_failure_prefers_drawing_error() {
    let err = first_failure(
        Err(anyhow::anyhow!("draw failed")),
        [Err(io::Error::other("raw")), Ok(())],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "draw failed");
}

#[test]
fn test_first_failure_reports_teardown_error() {
    let err = first_failure(Ok(()), [Ok(()), Err(io::Error::other("screen"))]).unwrap_err();
    assert_eq!(err.to_string(), "screen");
    assert!(first_failure(Ok(()), [Ok(()), Ok(())]).is_ok());
}
