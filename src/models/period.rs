use anyhow::{Context, Result};
use chrono::{Datelike, Month, NaiveDate};

use super::expense::parse_date;

/// A day, a month of a given year, or a whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl Period {
    pub fn day_of(date: NaiveDate) -> Self {
        Self::Day(date)
    }

    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year_of(date: NaiveDate) -> Self {
        Self::Year(date.year())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Day(d) => d == date,
            Self::Month { year, month } => date.year() == year && date.month() == month,
            Self::Year(year) => date.year() == year,
        }
    }

    /// "date", "month" or "year", for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Day(_) => "date",
            Self::Month { .. } => "month",
            Self::Year(_) => "year",
        }
    }

    /// Human title: `01-01-2024`, `January 2024`, `2024`.
    pub fn title(&self) -> String {
        match *self {
            Self::Day(d) => d.format(super::DATE_FORMAT).to_string(),
            Self::Month { year, month } => format!("{} {year}", month_name(month)),
            Self::Year(year) => year.to_string(),
        }
    }

    /// Parse `DD-MM-YYYY`, `MM-YYYY` or `YYYY`.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.matches('-').count() {
            2 => Ok(Self::Day(parse_date(trimmed)?)),
            1 => {
                let (m, y) = trimmed
                    .split_once('-')
                    .context("Invalid month, expected MM-YYYY")?;
                Ok(Self::Month {
                    year: parse_year(y)?,
                    month: parse_month(m)?,
                })
            }
            _ => Ok(Self::Year(parse_year(trimmed)?)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Month from `1`..`12` or an English name/abbreviation.
pub(crate) fn parse_month(s: &str) -> Result<u32> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        if (1..=12).contains(&n) {
            return Ok(n);
        }
        anyhow::bail!("Month out of range: {n}");
    }
    trimmed
        .parse::<Month>()
        .map(|m| m.number_from_month())
        .map_err(|_| anyhow::anyhow!("Unknown month: {trimmed}"))
}

pub(crate) fn parse_year(s: &str) -> Result<i32> {
    let trimmed = s.trim();
    trimmed
        .parse::<i32>()
        .with_context(|| format!("Invalid year: {trimmed}"))
}

pub(crate) fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}
