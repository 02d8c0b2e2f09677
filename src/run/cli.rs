use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use crate::config::Settings;
use crate::generate::{self, GeneratorConfig};
use crate::models::Period;
use crate::query;
use crate::store::ExpenseStore;
use crate::ui::report::Report;

pub(crate) fn as_cli(settings: &Settings) -> Result<()> {
    let args = &settings.command;
    match args[0].as_str() {
        "generate" | "gen" => cli_generate(&args[1..]),
        "summary" | "s" => cli_summary(&args[1..], settings),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendwise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendWise - personal expense tracker");
    println!();
    println!("Usage: spendwise [--file <path>] [--currency <symbol>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch the interactive menu");
    println!("  generate [path]               Write random expenses (default: generated_data.txt)");
    println!("    --count <n>                 Number of rows (default: 1000)");
    println!("    --year <YYYY>               Year to spread dates over (default: 2024)");
    println!("    --seed <n>                  Fixed random seed");
    println!("  summary [period]              Totals for DD-MM-YYYY, MM-YYYY or YYYY");
    println!("                                (default: current month)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --file, -f <path>             Expense file (default: expense.txt)");
    println!("  --currency <symbol>           Currency symbol for display (default: ₹)");
}

/// Output path, generator settings and optional seed from `generate` args.
pub(crate) fn parse_generate_args(
    args: &[String],
) -> Result<(PathBuf, GeneratorConfig, Option<u64>)> {
    let mut config = GeneratorConfig::default();
    let mut path = PathBuf::from(generate::DEFAULT_OUTPUT);
    let mut seed = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--count" => {
                let value = iter.next().context("--count needs a number")?;
                config.count = value
                    .parse()
                    .with_context(|| format!("Invalid count: {value}"))?;
            }
            "--year" => {
                let value = iter.next().context("--year needs a year")?;
                config.year = value
                    .parse()
                    .with_context(|| format!("Invalid year: {value}"))?;
            }
            "--seed" => {
                let value = iter.next().context("--seed needs a number")?;
                seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid seed: {value}"))?,
                );
            }
            flag if flag.starts_with('-') => anyhow::bail!("Unknown option: {flag}"),
            other => path = PathBuf::from(other),
        }
    }
    Ok((path, config, seed))
}

fn cli_generate(args: &[String]) -> Result<()> {
    let (path, config, seed) = parse_generate_args(args)?;
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let count = generate::write_file(&path, &config, &mut rng)?;
    println!(
        "Generated {count} expenses with continuous serial numbers across {} into {}",
        config.year,
        path.display()
    );
    Ok(())
}

/// Lines for the `summary` command: the period total then each category.
pub(crate) fn summary_lines(store: &ExpenseStore, period: &Period, report: &Report) -> Vec<String> {
    let mut lines = report.total(&query::period_total(
        store.expenses(),
        period,
        store.limits(),
    ));
    let breakdown = query::by_category(store.expenses(), period);
    if !breakdown.is_empty() {
        lines.push(String::new());
        lines.extend(report.category_totals(&breakdown));
    }
    lines
}

fn cli_summary(args: &[String], settings: &Settings) -> Result<()> {
    let period = match args.first().filter(|a| !a.starts_with('-')) {
        Some(raw) => Period::parse(raw)?,
        None => Period::month_of(chrono::Local::now().date_naive()),
    };

    let (store, load) = ExpenseStore::open(&settings.expense_file)?;
    let report = Report::new(settings.currency_symbol.as_str());
    if let Some(load) = load.filter(|l| !l.skipped.is_empty()) {
        for line in report.load(&load) {
            eprintln!("{line}");
        }
    }

    println!("SpendWise - {period}");
    println!("{}", "─".repeat(40));
    for line in summary_lines(&store, &period, &report) {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::NewExpense;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_generate_args_defaults() {
        let (path, config, seed) = parse_generate_args(&[]).unwrap();
        assert_eq!(path, PathBuf::from("generated_data.txt"));
        assert_eq!(config.count, 1000);
        assert_eq!(config.year, 2024);
        assert!(seed.is_none());
    }

    #[test]
    fn test_generate_args_all_options() {
        let (path, config, seed) =
            parse_generate_args(&args(&["out.txt", "--count", "10", "--year", "2023", "--seed", "42"]))
                .unwrap();
        assert_eq!(path, PathBuf::from("out.txt"));
        assert_eq!(config.count, 10);
        assert_eq!(config.year, 2023);
        assert_eq!(seed, Some(42));
    }

    #[test]
    fn test_generate_args_errors() {
        assert!(parse_generate_args(&args(&["--count"])).is_err());
        assert!(parse_generate_args(&args(&["--count", "many"])).is_err());
        assert!(parse_generate_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_summary_lines() {
        let mut store = ExpenseStore::in_memory();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        store
            .add(NewExpense::new("food", dec!(100)).on(day))
            .unwrap();
        store
            .add(NewExpense::new("travel", dec!(50)).on(day))
            .unwrap();

        let lines = summary_lines(&store, &Period::Year(2024), &Report::new("₹"));
        assert_eq!(
            lines,
            vec![
                "Total Expenses for 2024: ₹150.00",
                "",
                "Total expense in food for 2024: ₹100.00",
                "Total expense in travel for 2024: ₹50.00",
            ]
        );
    }

    #[test]
    fn test_summary_lines_empty_period() {
        let store = ExpenseStore::in_memory();
        let lines = summary_lines(&store, &Period::Year(2024), &Report::new("₹"));
        assert_eq!(lines, vec!["Total Expenses for 2024: ₹0.00"]);
    }

    #[test]
    fn test_unknown_command_errors() {
        let settings = Settings {
            command: args(&["frobnicate"]),
            ..Default::default()
        };
        assert!(as_cli(&settings).is_err());
    }
}
