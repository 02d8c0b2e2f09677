use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Day-month-year, the only date layout used on disk and at the prompt.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub serial: u32,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub comment: String,
}

impl Expense {
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Input for a new record. The store assigns the serial.
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    pub category: String,
    pub amount: Decimal,
    /// `None` means today.
    pub date: Option<NaiveDate>,
    pub comment: String,
}

impl NewExpense {
    pub fn new(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            amount,
            ..Default::default()
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct ExpenseEdit {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub comment: Option<String>,
}

impl ExpenseEdit {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.comment.is_none()
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{trimmed}', expected DD-MM-YYYY"))
}

/// Parse a non-negative amount. A leading currency symbol and thousands
/// separators are accepted.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '.')
        .replace(',', "");
    let amount = Decimal::from_str(&cleaned)
        .with_context(|| format!("Failed to parse '{}' as an amount", s.trim()))?;
    if amount < Decimal::ZERO {
        anyhow::bail!("Amount cannot be negative: {amount}");
    }
    Ok(amount)
}
