mod format;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::models::*;
use crate::query;

pub(crate) use format::{read_expenses, write_expenses, SkippedLine};

/// Result of adding a record: its serial and any limits now exceeded.
#[derive(Debug, Clone)]
pub(crate) struct AddOutcome {
    pub(crate) serial: u32,
    pub(crate) breaches: Vec<LimitBreach>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LoadReport {
    pub(crate) loaded: usize,
    pub(crate) skipped: Vec<SkippedLine>,
}

/// In-memory list of expenses mirrored to a pipe-delimited file.
///
/// Serials are always `1..=len` in list order once a delete has run. Every
/// mutation rewrites the active file in full.
pub(crate) struct ExpenseStore {
    expenses: Vec<Expense>,
    categories: BTreeSet<String>,
    limits: Limits,
    path: Option<PathBuf>,
    next_serial: u32,
}

impl ExpenseStore {
    /// Empty store that persists to `path`.
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::detached()
        }
    }

    /// Open `path`, loading it if it exists. A missing file gives an empty store.
    pub(crate) fn open(path: &Path) -> Result<(Self, Option<LoadReport>)> {
        let mut store = Self::new(path);
        if !path.exists() {
            info!("No expense file at {}, starting empty", path.display());
            return Ok((store, None));
        }
        let report = store.load(path)?;
        Ok((store, Some(report)))
    }

    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        Self::detached()
    }

    fn detached() -> Self {
        Self {
            expenses: Vec::new(),
            categories: BTreeSet::new(),
            limits: Limits::default(),
            path: None,
            next_serial: 1,
        }
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn len(&self) -> usize {
        self.expenses.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub(crate) fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub(crate) fn limits(&self) -> &Limits {
        &self.limits
    }

    pub(crate) fn set_limit(&mut self, kind: LimitKind, limit: Option<Decimal>) {
        self.limits.set(kind, limit);
    }

    /// File that mutations are written to.
    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// One past the highest serial seen since the last load or mutation.
    pub(crate) fn next_serial(&self) -> u32 {
        self.next_serial
    }

    #[cfg(test)]
    pub(crate) fn get(&self, serial: u32) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.serial == serial)
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Append a record dated today unless a date is given, then persist.
    ///
    /// Limits are checked after the record is in the list, so a breach is
    /// reported for the add that caused it. The record is kept either way.
    pub(crate) fn add(&mut self, new: NewExpense) -> Result<AddOutcome> {
        if new.amount < Decimal::ZERO {
            anyhow::bail!("Amount cannot be negative: {}", new.amount);
        }
        let date = new
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let serial = u32::try_from(self.expenses.len() + 1).context("Too many expenses")?;

        self.categories.insert(new.category.clone());
        self.expenses.push(Expense {
            serial,
            date,
            category: new.category,
            amount: new.amount,
            comment: new.comment,
        });
        self.next_serial = self.next_serial.max(serial.saturating_add(1));
        debug!("Added expense #{serial} on {date}");

        let breaches = query::check_limits(&self.expenses, date, &self.limits);
        for b in &breaches {
            warn!(
                "{} limit {} exceeded for {}: spent {}",
                b.kind, b.limit, b.period, b.spent
            );
        }

        self.persist()?;
        Ok(AddOutcome { serial, breaches })
    }

    /// Overwrite the given fields of record `serial`, then persist.
    /// Returns the updated record, or `None` if no record has that serial.
    pub(crate) fn edit(&mut self, serial: u32, edit: ExpenseEdit) -> Result<Option<Expense>> {
        if let Some(amount) = edit.amount {
            if amount < Decimal::ZERO {
                anyhow::bail!("Amount cannot be negative: {amount}");
            }
        }
        let Some(expense) = self.expenses.iter_mut().find(|e| e.serial == serial) else {
            debug!("Edit: no expense #{serial}");
            return Ok(None);
        };
        if edit.is_empty() {
            return Ok(Some(expense.clone()));
        }

        if let Some(category) = edit.category {
            self.categories.insert(category.clone());
            expense.category = category;
        }
        if let Some(amount) = edit.amount {
            expense.amount = amount;
        }
        if let Some(date) = edit.date {
            expense.date = date;
        }
        if let Some(comment) = edit.comment {
            expense.comment = comment;
        }
        let updated = expense.clone();
        debug!("Edited expense #{serial}");

        self.persist()?;
        Ok(Some(updated))
    }

    /// Remove record `serial` and renumber the rest from 1, then persist.
    /// Returns the removed record, or `None` if no record has that serial.
    pub(crate) fn delete(&mut self, serial: u32) -> Result<Option<Expense>> {
        let Some(idx) = self.expenses.iter().position(|e| e.serial == serial) else {
            debug!("Delete: no expense #{serial}");
            return Ok(None);
        };
        let removed = self.expenses.remove(idx);
        self.renumber();
        debug!("Deleted expense #{serial}");

        self.persist()?;
        Ok(Some(removed))
    }

    fn renumber(&mut self) {
        let mut next = 1u32;
        for expense in &mut self.expenses {
            expense.serial = next;
            next = next.saturating_add(1);
        }
        self.next_serial = next;
    }

    // ── Files ─────────────────────────────────────────────────

    /// Replace the whole store with the contents of `path` and make it the
    /// active file. Malformed lines are skipped and reported.
    pub(crate) fn load(&mut self, path: &Path) -> Result<LoadReport> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open expense file: {}", path.display()))?;
        let (expenses, skipped) = read_expenses(BufReader::new(file))
            .with_context(|| format!("Failed to load {}", path.display()))?;

        for line in &skipped {
            warn!(
                "Skipping line {} of {} ({}): {}",
                line.line,
                path.display(),
                line.reason,
                line.raw
            );
        }

        self.next_serial = expenses
            .iter()
            .map(|e| e.serial.saturating_add(1))
            .max()
            .unwrap_or(1);
        self.categories = expenses.iter().map(|e| e.category.clone()).collect();
        self.expenses = expenses;
        self.path = Some(path.to_path_buf());
        info!(
            "Loaded {} expenses from {} ({} skipped)",
            self.expenses.len(),
            path.display(),
            skipped.len()
        );

        Ok(LoadReport {
            loaded: self.expenses.len(),
            skipped,
        })
    }

    /// Write every record to `path`, replacing its contents.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create expense file: {}", path.display()))?;
        write_expenses(BufWriter::new(file), &self.expenses)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        info!("Saved {} expenses to {}", self.expenses.len(), path.display());
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.save(path),
            None => Ok(()),
        }
    }
}
