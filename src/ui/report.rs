//! Console text for listings, totals and limit warnings.
//!
//! Everything returns lines; the caller decides where they go.

use std::collections::BTreeMap;

use crate::models::{Expense, LimitBreach, Period};
use crate::query::{Breakdown, PeriodTotal};
use crate::store::{LoadReport, SkippedLine};
use crate::ui::util::format_amount;

pub(crate) struct Report {
    currency: String,
}

impl Report {
    pub(crate) fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub(crate) fn amount(&self, val: rust_decimal::Decimal) -> String {
        format_amount(val, &self.currency)
    }

    pub(crate) fn empty(period: &Period) -> String {
        format!("No expenses recorded for this {}.", period.kind())
    }

    /// One line per record, or the "no expenses" message.
    pub(crate) fn listing(&self, period: &Period, expenses: &[&Expense]) -> Vec<String> {
        if expenses.is_empty() {
            return vec![Self::empty(period)];
        }
        let mut lines = vec![match period {
            Period::Day(_) => format!("Expenses on {period}:"),
            _ => format!("Expenses for {period}:"),
        }];
        lines.extend(expenses.iter().map(|e| {
            format!(
                "Serial Number: {} | Date: {} | Category: {} | Amount: {} | Comment: {}",
                e.serial,
                e.date_string(),
                e.category,
                self.amount(e.amount),
                e.comment
            )
        }));
        lines
    }

    pub(crate) fn total(&self, total: &PeriodTotal) -> Vec<String> {
        let mut lines = vec![match total.period {
            Period::Day(_) => format!(
                "Total Expenses on {}: {}",
                total.period,
                self.amount(total.total)
            ),
            _ => format!(
                "Total Expenses for {}: {}",
                total.period,
                self.amount(total.total)
            ),
        }];
        if let Some(breach) = &total.breach {
            lines.push(self.breach(breach));
        }
        lines
    }

    /// Records grouped by category, numbered within each group.
    pub(crate) fn category_listing(
        &self,
        period: &Period,
        groups: &BTreeMap<String, Vec<&Expense>>,
    ) -> Vec<String> {
        if groups.is_empty() {
            return vec![Self::empty(period)];
        }
        let mut lines = vec![match period {
            Period::Day(_) => format!("Daily Expenses for {period}:"),
            Period::Month { .. } => format!("Monthly Expenses for {period}:"),
            Period::Year(_) => format!("Yearly Expenses for {period}:"),
        }];
        for (category, expenses) in groups {
            lines.push(String::new());
            lines.push(format!("Category: {category}"));
            for (idx, e) in expenses.iter().enumerate() {
                let line = match period {
                    Period::Day(_) => format!(
                        "{}. Amount: {} | Comment: {}",
                        idx + 1,
                        self.amount(e.amount),
                        e.comment
                    ),
                    _ => format!(
                        "{}. Date: {} | Amount: {} | Comment: {}",
                        idx + 1,
                        e.date_string(),
                        self.amount(e.amount),
                        e.comment
                    ),
                };
                lines.push(line);
            }
        }
        lines
    }

    pub(crate) fn category_totals(&self, breakdown: &Breakdown<String>) -> Vec<String> {
        if breakdown.is_empty() {
            return vec![Self::empty(&breakdown.period)];
        }
        let preposition = match breakdown.period {
            Period::Day(_) => "on",
            _ => "for",
        };
        breakdown
            .groups
            .iter()
            .map(|(category, amount)| {
                format!(
                    "Total expense in {category} {preposition} {}: {}",
                    breakdown.period,
                    self.amount(*amount)
                )
            })
            .collect()
    }

    pub(crate) fn breach(&self, breach: &LimitBreach) -> String {
        format!(
            "Warning: You have exceeded your {} spending limit! ({} spent against {} for {})",
            breach.kind,
            self.amount(breach.spent),
            self.amount(breach.limit),
            breach.period
        )
    }

    pub(crate) fn load(&self, report: &LoadReport) -> Vec<String> {
        let mut lines: Vec<String> = report.skipped.iter().map(skipped_line).collect();
        lines.push(format!(
            "Loaded {} expenses ({} lines skipped).",
            report.loaded,
            report.skipped.len()
        ));
        lines
    }
}

fn skipped_line(line: &SkippedLine) -> String {
    format!(
        "Issue loading line {}: {} ({})",
        line.line, line.raw, line.reason
    )
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
