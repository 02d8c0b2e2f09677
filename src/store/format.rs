use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::{Read, Write};
use std::str::FromStr;

use crate::models::{parse_date, Expense};

/// `serial|date|category|amount|comment`
pub(crate) const FIELD_COUNT: usize = 5;
const DELIMITER: u8 = b'|';

/// A line that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkippedLine {
    pub(crate) line: u64,
    pub(crate) raw: String,
    pub(crate) reason: String,
}

/// Decode every well-formed line; collect the rest as skipped.
pub(crate) fn read_expenses<R: Read>(reader: R) -> Result<(Vec<Expense>, Vec<SkippedLine>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut expenses = Vec::new();
    let mut skipped = Vec::new();
    for (i, result) in rdr.byte_records().enumerate() {
        let record = result.context("Failed to read expense file")?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(i as u64 + 1);
        let fields = record
            .iter()
            .map(std::str::from_utf8)
            .collect::<std::result::Result<Vec<&str>, _>>();
        let Ok(fields) = fields else {
            let raw: Vec<String> = record
                .iter()
                .map(|f| String::from_utf8_lossy(f).into_owned())
                .collect();
            skipped.push(SkippedLine {
                line,
                raw: raw.join("|"),
                reason: "invalid UTF-8".to_string(),
            });
            continue;
        };
        match decode(&fields) {
            Ok(expense) => expenses.push(expense),
            Err(reason) => skipped.push(SkippedLine {
                line,
                raw: fields.join("|"),
                reason,
            }),
        }
    }
    Ok((expenses, skipped))
}

fn decode(fields: &[&str]) -> std::result::Result<Expense, String> {
    if fields.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        ));
    }
    // Serials start at 1 and must leave room for a successor.
    let serial = fields[0]
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..u32::MAX).contains(n))
        .ok_or_else(|| format!("invalid serial number '{}'", fields[0]))?;
    let date = parse_date(fields[1]).map_err(|e| e.to_string())?;
    let amount = Decimal::from_str(fields[3].trim())
        .map_err(|_| format!("invalid amount '{}'", fields[3]))?;
    if amount < Decimal::ZERO {
        return Err(format!("negative amount '{}'", fields[3]));
    }
    Ok(Expense {
        serial,
        date,
        category: fields[2].to_string(),
        amount,
        comment: fields[4].to_string(),
    })
}

/// Write one line per record, in order.
pub(crate) fn write_expenses<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    for expense in expenses {
        wtr.write_record([
            expense.serial.to_string(),
            expense.date_string(),
            clean(&expense.category),
            expense.amount.to_string(),
            clean(&expense.comment),
        ])
        .context("Failed to write expense record")?;
    }
    wtr.flush().context("Failed to flush expense file")?;
    Ok(())
}

/// Keep each record on one line with exactly five fields.
fn clean(field: &str) -> String {
    field.replace(['|', '\r', '\n'], " ")
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
