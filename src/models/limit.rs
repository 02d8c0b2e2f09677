use rust_decimal::Decimal;

use super::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Daily,
    Monthly,
    Yearly,
}

impl LimitKind {
    pub fn all() -> &'static [LimitKind] {
        &[Self::Daily, Self::Monthly, Self::Yearly]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// The limit that applies to totals over `period`.
    pub fn for_period(period: &Period) -> Self {
        match period {
            Period::Day(_) => Self::Daily,
            Period::Month { .. } => Self::Monthly,
            Period::Year(_) => Self::Yearly,
        }
    }

    /// The period of this kind that contains `date`.
    pub fn period_of(&self, date: chrono::NaiveDate) -> Period {
        match self {
            Self::Daily => Period::day_of(date),
            Self::Monthly => Period::month_of(date),
            Self::Yearly => Period::year_of(date),
        }
    }
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Advisory spending thresholds. Never block an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limits {
    pub daily: Option<Decimal>,
    pub monthly: Option<Decimal>,
    pub yearly: Option<Decimal>,
}

impl Limits {
    pub fn get(&self, kind: LimitKind) -> Option<Decimal> {
        match kind {
            LimitKind::Daily => self.daily,
            LimitKind::Monthly => self.monthly,
            LimitKind::Yearly => self.yearly,
        }
    }

    pub fn set(&mut self, kind: LimitKind, limit: Option<Decimal>) {
        match kind {
            LimitKind::Daily => self.daily = limit,
            LimitKind::Monthly => self.monthly = limit,
            LimitKind::Yearly => self.yearly = limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitBreach {
    pub kind: LimitKind,
    pub period: Period,
    pub limit: Decimal,
    pub spent: Decimal,
}

impl LimitBreach {
    /// `Some` only when `spent` is strictly greater than `limit`.
    pub fn check(kind: LimitKind, period: Period, limit: Decimal, spent: Decimal) -> Option<Self> {
        (spent > limit).then_some(Self {
            kind,
            period,
            limit,
            spent,
        })
    }
}
