//! Random test data in the expense file format.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::models::Expense;
use crate::store::write_expenses;

pub(crate) const DEFAULT_OUTPUT: &str = "generated_data.txt";

#[derive(Debug, Clone)]
pub(crate) struct GeneratorConfig {
    pub(crate) count: u32,
    pub(crate) year: i32,
    pub(crate) categories: Vec<String>,
    /// Inclusive bounds, in cents.
    pub(crate) min_cents: i64,
    pub(crate) max_cents: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            year: 2024,
            categories: ["food", "travel", "education", "shopping", "entertainment"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            min_cents: 10_00,
            max_cents: 500_00,
        }
    }
}

/// `count` records with serials `1..=count`, uniform over the year's days,
/// the category list and the amount range.
pub(crate) fn generate<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Vec<Expense>> {
    let start = NaiveDate::from_ymd_opt(config.year, 1, 1)
        .with_context(|| format!("Invalid year: {}", config.year))?;
    let end = NaiveDate::from_ymd_opt(config.year, 12, 31)
        .with_context(|| format!("Invalid year: {}", config.year))?;
    let days_in_year = u64::from(end.ordinal0());
    if config.categories.is_empty() {
        anyhow::bail!("No categories to pick from");
    }
    if config.min_cents < 0 || config.min_cents > config.max_cents {
        anyhow::bail!(
            "Invalid amount range: {} to {}",
            Decimal::new(config.min_cents, 2),
            Decimal::new(config.max_cents, 2)
        );
    }

    let mut expenses = Vec::with_capacity(config.count as usize);
    for serial in 1..=config.count {
        let offset = rng.gen_range(0..=days_in_year);
        let date = start
            .checked_add_days(chrono::Days::new(offset))
            .context("Generated date out of range")?;
        let category = config
            .categories
            .choose(rng)
            .context("No categories to pick from")?
            .clone();
        let amount = Decimal::new(rng.gen_range(config.min_cents..=config.max_cents), 2);
        expenses.push(Expense {
            serial,
            date,
            category,
            amount,
            comment: String::new(),
        });
    }
    Ok(expenses)
}

/// Generate and write to `path`, overwriting it. Returns the row count.
pub(crate) fn write_file<R: Rng>(path: &Path, config: &GeneratorConfig, rng: &mut R) -> Result<usize> {
    let expenses = generate(config, rng)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_expenses(BufWriter::new(file), &expenses)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(
        "Generated {} expenses for {} into {}",
        expenses.len(),
        config.year,
        path.display()
    );
    Ok(expenses.len())
}

#[cfg(test)]
mod tests;
