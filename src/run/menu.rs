use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::models::*;
use crate::query;
use crate::store::ExpenseStore;
use crate::ui::chart::{Chart, ChartRenderer, TerminalCharts};
use crate::ui::report::Report;

const OPTIONS: [&str; 25] = [
    "Add Expense",
    "Edit Expense",
    "Delete Expense",
    "Set Daily Limit",
    "Set Monthly Limit",
    "Set Yearly Limit",
    "View Daily Expenses",
    "View Monthly Expenses",
    "View Yearly Expenses",
    "Total Daily Expense",
    "Total Monthly Expense",
    "Total Yearly Expense",
    "View Daily Expense by Category",
    "View Monthly Expense by Category",
    "View Yearly Expense by Category",
    "Total Daily Expense by Category",
    "Total Monthly Expense by Category",
    "Total Yearly Expense by Category",
    "Visualize Daily Expenses",
    "Visualize Monthly Expenses",
    "Visualize Monthly Expenses per Year",
    "Visualize Yearly Expenses",
    "Save Expenses",
    "Load Expenses",
    "Exit",
];

pub(crate) fn as_menu(settings: &Settings) -> Result<()> {
    let (mut store, report) = ExpenseStore::open(&settings.expense_file)?;
    let printer = Report::new(settings.currency_symbol.as_str());
    if let Some(report) = report {
        for line in printer.load(&report) {
            println!("{line}");
        }
    }
    log::debug!(
        "{} expenses in {}, next serial {}",
        store.len(),
        settings.expense_file.display(),
        store.next_serial()
    );

    let mut charts = TerminalCharts::new(settings.currency_symbol.as_str());
    let stdin = io::stdin();
    let mut menu = Menu::new(
        &mut store,
        stdin.lock(),
        io::stdout(),
        &mut charts,
        printer,
        chrono::Local::now().date_naive(),
    );
    menu.run()
}

enum Flow {
    Continue,
    Exit,
}

/// Numbered-menu loop over one store.
pub(crate) struct Menu<'a, R, W, C> {
    store: &'a mut ExpenseStore,
    input: R,
    out: W,
    charts: &'a mut C,
    report: Report,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write, C: ChartRenderer> Menu<'a, R, W, C> {
    pub(crate) fn new(
        store: &'a mut ExpenseStore,
        input: R,
        out: W,
        charts: &'a mut C,
        report: Report,
        today: NaiveDate,
    ) -> Self {
        Self {
            store,
            input,
            out,
            charts,
            report,
            today,
        }
    }

    /// Show the menu until "Exit" or end of input. A failed choice is
    /// reported and the menu shown again.
    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out)?;
            for (i, option) in OPTIONS.iter().enumerate() {
                writeln!(self.out, "{}. {option}", i + 1)?;
            }
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                writeln!(self.out)?;
                return Ok(());
            };
            match self.dispatch(choice.trim()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    writeln!(self.out, "Exiting...")?;
                    return Ok(());
                }
                Err(e) => writeln!(self.out, "Error: {e:#}")?,
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.add()?,
            "2" => self.edit()?,
            "3" => self.delete()?,
            "4" => self.set_limit(LimitKind::Daily)?,
            "5" => self.set_limit(LimitKind::Monthly)?,
            "6" => self.set_limit(LimitKind::Yearly)?,
            "7" => {
                let period = self.ask_day()?;
                self.view(&period)?;
            }
            "8" => {
                let period = self.ask_month()?;
                self.view(&period)?;
            }
            "9" => {
                let period = self.ask_year()?;
                self.view(&period)?;
            }
            "10" => {
                let period = self.ask_day()?;
                self.total(&period)?;
            }
            "11" => {
                let period = self.ask_month()?;
                self.total(&period)?;
            }
            "12" => {
                let period = self.ask_year()?;
                self.total(&period)?;
            }
            "13" => {
                let period = self.ask_day()?;
                self.view_by_category(&period)?;
            }
            "14" => {
                let period = self.ask_month()?;
                self.view_by_category(&period)?;
            }
            "15" => {
                let period = self.ask_year()?;
                self.view_by_category(&period)?;
            }
            "16" => {
                let period = self.ask_day()?;
                self.total_by_category(&period)?;
            }
            "17" => {
                let period = self.ask_month()?;
                self.total_by_category(&period)?;
            }
            "18" => {
                let period = self.ask_year()?;
                self.total_by_category(&period)?;
            }
            "19" => {
                let period = self.ask_day()?;
                self.visualize_categories(&period)?;
            }
            "20" => {
                let period = self.ask_month()?;
                self.visualize_categories(&period)?;
            }
            "21" => {
                let year = self.ask_year_number()?;
                self.visualize_months(year)?;
            }
            "22" => {
                let period = self.ask_year()?;
                self.visualize_categories(&period)?;
            }
            "23" => self.save()?,
            "24" => self.load()?,
            "25" => return Ok(Flow::Exit),
            _ => writeln!(self.out, "Invalid choice. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    // ── Records ───────────────────────────────────────────────

    fn add(&mut self) -> Result<()> {
        let question = if self.store.categories().is_empty() {
            "Enter category: ".to_string()
        } else {
            let known: Vec<&str> = self.store.categories().iter().map(String::as_str).collect();
            format!("Enter category ({}): ", known.join(", "))
        };
        let category = self.ask(&question)?;
        let amount = self.ask("Enter amount: ")?;
        let date = self.ask("Enter date (press Enter for today's date): ")?;
        let comment = self.ask("Enter comment (optional): ")?;

        let new = NewExpense::new(category.trim(), parse_amount(&amount)?)
            .on(self.date_or_today(&date)?)
            .with_comment(comment.trim());
        let outcome = self.store.add(new)?;
        for breach in &outcome.breaches {
            let line = self.report.breach(breach);
            writeln!(self.out, "{line}")?;
        }
        writeln!(
            self.out,
            "Expense added successfully. (Serial Number: {})",
            outcome.serial
        )?;
        Ok(())
    }

    fn edit(&mut self) -> Result<()> {
        let serial = self.ask("Enter serial number of the expense to edit: ")?;
        let category = self.ask("Enter new category (press Enter to keep unchanged): ")?;
        let amount = self.ask("Enter new amount (press Enter to keep unchanged): ")?;
        let date = self.ask("Enter new date (press Enter to keep unchanged): ")?;
        let comment = self.ask("Enter new comment (press Enter to keep unchanged): ")?;

        let serial = parse_serial(&serial)?;
        let edit = ExpenseEdit {
            category: non_empty(&category).map(str::to_string),
            amount: non_empty(&amount).map(parse_amount).transpose()?,
            date: non_empty(&date).map(parse_date).transpose()?,
            comment: non_empty(&comment).map(str::to_string),
        };
        match self.store.edit(serial, edit)? {
            Some(_) => writeln!(self.out, "Expense edited successfully.")?,
            None => writeln!(self.out, "Expense not found.")?,
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let serial = parse_serial(&self.ask("Enter serial number of the expense to delete: ")?)?;
        match self.store.delete(serial)? {
            Some(_) => writeln!(self.out, "Expense deleted successfully.")?,
            None => writeln!(self.out, "Expense not found.")?,
        }
        Ok(())
    }

    fn set_limit(&mut self, kind: LimitKind) -> Result<()> {
        let raw = self.ask(&format!("Enter {kind} limit (press Enter to clear): "))?;
        let limit = non_empty(&raw).map(parse_amount).transpose()?;
        self.store.set_limit(kind, limit);
        match limit {
            Some(l) => {
                let shown = self.report.amount(l);
                writeln!(self.out, "{} limit set to {shown}.", capitalize(kind.as_str()))?
            }
            None => writeln!(self.out, "{} limit cleared.", capitalize(kind.as_str()))?,
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    fn view(&mut self, period: &Period) -> Result<()> {
        let found = query::filter(self.store.expenses(), period);
        let lines = self.report.listing(period, &found);
        self.print(&lines)
    }

    fn total(&mut self, period: &Period) -> Result<()> {
        let total = query::period_total(self.store.expenses(), period, self.store.limits());
        let lines = self.report.total(&total);
        self.print(&lines)
    }

    fn view_by_category(&mut self, period: &Period) -> Result<()> {
        let groups = query::list_by_category(self.store.expenses(), period);
        let lines = self.report.category_listing(period, &groups);
        self.print(&lines)
    }

    fn total_by_category(&mut self, period: &Period) -> Result<()> {
        let breakdown = query::by_category(self.store.expenses(), period);
        let lines = self.report.category_totals(&breakdown);
        self.print(&lines)
    }

    fn visualize_categories(&mut self, period: &Period) -> Result<()> {
        let breakdown = query::by_category(self.store.expenses(), period);
        if breakdown.is_empty() {
            writeln!(self.out, "{}", Report::empty(period))?;
            return Ok(());
        }
        self.charts.render(&Chart::share_of(&breakdown))
    }

    fn visualize_months(&mut self, year: i32) -> Result<()> {
        let breakdown = query::by_month(self.store.expenses(), year);
        if breakdown.is_empty() {
            writeln!(self.out, "{}", Report::empty(&breakdown.period))?;
            return Ok(());
        }
        self.charts.render(&Chart::months_of(&breakdown))
    }

    // ── Files ─────────────────────────────────────────────────

    fn save(&mut self) -> Result<()> {
        let path = self.ask_path("Enter filename to save expenses")?;
        self.store.save(&path)?;
        writeln!(self.out, "Expenses saved to {}.", path.display())?;
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let path = self.ask_path("Enter filename to load expenses")?;
        let report = self.store.load(&path)?;
        let lines = self.report.load(&report);
        self.print(&lines)
    }

    // ── Input ─────────────────────────────────────────────────

    /// `None` at end of input.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// End of input reads as an empty answer.
    fn ask(&mut self, question: &str) -> Result<String> {
        Ok(self.prompt(question)?.unwrap_or_default())
    }

    fn date_or_today(&self, raw: &str) -> Result<NaiveDate> {
        match non_empty(raw) {
            Some(s) => parse_date(s),
            None => Ok(self.today),
        }
    }

    fn ask_day(&mut self) -> Result<Period> {
        let raw = self.ask("Enter date (press Enter for today's date): ")?;
        Ok(Period::Day(self.date_or_today(&raw)?))
    }

    fn ask_month(&mut self) -> Result<Period> {
        let month = self.ask("Enter month (press Enter for current month): ")?;
        let year = self.ask("Enter year (press Enter for current year): ")?;
        Ok(Period::Month {
            year: match non_empty(&year) {
                Some(y) => parse_year(y)?,
                None => self.today.year(),
            },
            month: match non_empty(&month) {
                Some(m) => parse_month(m)?,
                None => self.today.month(),
            },
        })
    }

    fn ask_year(&mut self) -> Result<Period> {
        Ok(Period::Year(self.ask_year_number()?))
    }

    fn ask_year_number(&mut self) -> Result<i32> {
        let year = self.ask("Enter year (press Enter for current year): ")?;
        match non_empty(&year) {
            Some(y) => parse_year(y),
            None => Ok(self.today.year()),
        }
    }

    /// Empty answer means the store's active file.
    fn ask_path(&mut self, question: &str) -> Result<PathBuf> {
        let active = self.store.path().map(|p| p.to_path_buf());
        let question = match &active {
            Some(p) => format!("{question} (press Enter for {}): ", p.display()),
            None => format!("{question}: "),
        };
        let raw = self.ask(&question)?;
        match (non_empty(&raw), active) {
            (Some(name), _) => Ok(PathBuf::from(name)),
            (None, Some(active)) => Ok(active),
            (None, None) => anyhow::bail!("No filename given"),
        }
    }

    fn print(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}

fn parse_serial(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .with_context(|| format!("Invalid serial number: '{}'", raw.trim()))
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
