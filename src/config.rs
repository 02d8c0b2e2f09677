use anyhow::Result;
use std::path::PathBuf;

pub(crate) const DEFAULT_EXPENSE_FILE: &str = "expense.txt";
pub(crate) const DEFAULT_CURRENCY: &str = "₹";

/// Runtime settings plus whatever arguments remain for the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) expense_file: PathBuf,
    pub(crate) currency_symbol: String,
    pub(crate) command: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            expense_file: PathBuf::from(DEFAULT_EXPENSE_FILE),
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            command: Vec::new(),
        }
    }
}

impl Settings {
    /// Pull `--file`/`-f` and `--currency` out of `args` (program name
    /// excluded). Everything else is kept, in order, as the command.
    pub(crate) fn from_args(args: &[String]) -> Result<Self> {
        let mut settings = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--file" | "-f" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("{arg} needs a path"))?;
                    settings.expense_file = PathBuf::from(value);
                }
                "--currency" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("{arg} needs a symbol"))?;
                    settings.currency_symbol = value.clone();
                }
                _ => settings.command.push(arg.clone()),
            }
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::from_args(&[]).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.expense_file, PathBuf::from("expense.txt"));
        assert_eq!(s.currency_symbol, "₹");
        assert!(s.command.is_empty());
    }

    #[test]
    fn test_file_and_currency_flags() {
        let s = Settings::from_args(&args(&["-f", "/tmp/x.txt", "--currency", "$"])).unwrap();
        assert_eq!(s.expense_file, PathBuf::from("/tmp/x.txt"));
        assert_eq!(s.currency_symbol, "$");
        assert!(s.command.is_empty());
    }

    #[test]
    fn test_command_keeps_order_around_flags() {
        let s = Settings::from_args(&args(&["summary", "--file", "a.txt", "03-2024"])).unwrap();
        assert_eq!(s.expense_file, PathBuf::from("a.txt"));
        assert_eq!(s.command, args(&["summary", "03-2024"]));
    }

    #[test]
    fn test_flag_missing_value() {
        assert!(Settings::from_args(&args(&["--file"])).is_err());
        assert!(Settings::from_args(&args(&["--currency"])).is_err());
    }
}
