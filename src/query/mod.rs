//! Read-only filtering and aggregation over the in-memory record list.
//!
//! Every function here is a linear scan over a slice of expenses. Nothing is
//! printed; callers hand the results to `ui::report` or `ui::chart`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{month_name, Expense, LimitBreach, LimitKind, Limits, Period};

/// A grouping of one period's amounts, keyed by `K`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown<K> {
    pub period: Period,
    pub groups: BTreeMap<K, Decimal>,
}

impl<K> Breakdown<K> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.groups.values().copied().sum()
    }
}

impl Breakdown<u32> {
    /// Month-number keys replaced by month names, in calendar order.
    pub fn labelled_months(&self) -> Vec<(String, Decimal)> {
        self.groups
            .iter()
            .map(|(m, amt)| (month_name(*m).to_string(), *amt))
            .collect()
    }
}

impl Breakdown<String> {
    pub fn labelled(&self) -> Vec<(String, Decimal)> {
        self.groups
            .iter()
            .map(|(k, amt)| (k.clone(), *amt))
            .collect()
    }
}

/// Total for a period, with the limit that applies to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotal {
    pub period: Period,
    pub total: Decimal,
    pub breach: Option<LimitBreach>,
}

pub fn filter<'a>(expenses: &'a [Expense], period: &Period) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| period.contains(e.date))
        .collect()
}

pub fn total(expenses: &[Expense], period: &Period) -> Decimal {
    expenses
        .iter()
        .filter(|e| period.contains(e.date))
        .map(|e| e.amount)
        .sum()
}

/// Sum of amounts per key.
pub fn group_sum_by<'a, K, I, F>(items: I, key: F) -> BTreeMap<K, Decimal>
where
    K: Ord,
    I: IntoIterator<Item = &'a Expense>,
    F: Fn(&Expense) -> K,
{
    let mut groups = BTreeMap::new();
    for expense in items {
        *groups.entry(key(expense)).or_insert(Decimal::ZERO) += expense.amount;
    }
    groups
}

/// Records per key, each list in store order.
pub fn group_list_by<'a, K, I, F>(items: I, key: F) -> BTreeMap<K, Vec<&'a Expense>>
where
    K: Ord,
    I: IntoIterator<Item = &'a Expense>,
    F: Fn(&Expense) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a Expense>> = BTreeMap::new();
    for expense in items {
        groups.entry(key(expense)).or_default().push(expense);
    }
    groups
}

pub fn by_category(expenses: &[Expense], period: &Period) -> Breakdown<String> {
    Breakdown {
        period: *period,
        groups: group_sum_by(filter(expenses, period), |e| e.category.clone()),
    }
}

pub fn list_by_category<'a>(
    expenses: &'a [Expense],
    period: &Period,
) -> BTreeMap<String, Vec<&'a Expense>> {
    group_list_by(filter(expenses, period), |e| e.category.clone())
}

/// Month totals for one year, keyed by month number.
pub fn by_month(expenses: &[Expense], year: i32) -> Breakdown<u32> {
    let period = Period::Year(year);
    Breakdown {
        period,
        groups: group_sum_by(filter(expenses, &period), |e| e.date.month()),
    }
}

pub fn period_total(expenses: &[Expense], period: &Period, limits: &Limits) -> PeriodTotal {
    let spent = total(expenses, period);
    let kind = LimitKind::for_period(period);
    PeriodTotal {
        period: *period,
        total: spent,
        breach: limits
            .get(kind)
            .and_then(|limit| LimitBreach::check(kind, *period, limit, spent)),
    }
}

/// All set limits exceeded by the periods containing `date`.
///
/// Sums include every record already in `expenses`, so when called right after
/// an add the new record counts towards the total.
pub fn check_limits(expenses: &[Expense], date: NaiveDate, limits: &Limits) -> Vec<LimitBreach> {
    LimitKind::all()
        .iter()
        .filter_map(|kind| {
            let limit = limits.get(*kind)?;
            let period = kind.period_of(date);
            LimitBreach::check(*kind, period, limit, total(expenses, &period))
        })
        .collect()
}
