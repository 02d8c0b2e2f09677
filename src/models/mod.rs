mod expense;
mod limit;
mod period;

pub use expense::{parse_amount, parse_date, Expense, ExpenseEdit, NewExpense, DATE_FORMAT};
pub use limit::{LimitBreach, LimitKind, Limits};
pub use period::Period;
pub(crate) use period::{month_name, parse_month, parse_year};
