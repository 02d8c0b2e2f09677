#![allow(clippy::unwrap_used)]

use super::*;
use chrono::Datelike;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;

use crate::store::ExpenseStore;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn test_default_config() {
    let config = GeneratorConfig::default();
    assert_eq!(config.count, 1000);
    assert_eq!(config.year, 2024);
    assert_eq!(config.categories.len(), 5);
    assert_eq!(config.min_cents, 1000);
    assert_eq!(config.max_cents, 50000);
}

#[test]
fn test_generate_contiguous_serials() {
    let expenses = generate(&GeneratorConfig::default(), &mut rng()).unwrap();
    assert_eq!(expenses.len(), 1000);
    for (i, e) in expenses.iter().enumerate() {
        assert_eq!(e.serial as usize, i + 1);
    }
}

#[test]
fn test_generate_values_in_range() {
    let config = GeneratorConfig::default();
    let expenses = generate(&config, &mut rng()).unwrap();
    for e in &expenses {
        assert_eq!(e.date.year(), 2024);
        assert!(config.categories.contains(&e.category));
        assert!(e.amount >= dec!(10.00) && e.amount <= dec!(500.00));
        assert!(e.amount.scale() <= 2);
        assert!(e.comment.is_empty());
    }
}

#[test]
fn test_generate_covers_every_category() {
    let config = GeneratorConfig::default();
    let expenses = generate(&config, &mut rng()).unwrap();
    for c in &config.categories {
        assert!(expenses.iter().any(|e| &e.category == c), "missing {c}");
    }
}

#[test]
fn test_generate_is_deterministic_for_seed() {
    let config = GeneratorConfig {
        count: 50,
        ..Default::default()
    };
    let a = generate(&config, &mut rng()).unwrap();
    let b = generate(&config, &mut rng()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_generate_leap_year_reaches_dec_31() {
    let config = GeneratorConfig {
        count: 5000,
        year: 2024,
        ..Default::default()
    };
    let expenses = generate(&config, &mut rng()).unwrap();
    assert!(expenses.iter().all(|e| e.date.year() == 2024));
    assert!(expenses.iter().any(|e| e.date.month() == 12 && e.date.day() == 31));
}

#[test]
fn test_generate_rejects_bad_config() {
    let empty = GeneratorConfig {
        categories: vec![],
        ..Default::default()
    };
    assert!(generate(&empty, &mut rng()).is_err());

    let inverted = GeneratorConfig {
        min_cents: 500,
        max_cents: 100,
        ..Default::default()
    };
    assert!(generate(&inverted, &mut rng()).is_err());
}

#[test]
fn test_write_file_loads_cleanly() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = GeneratorConfig {
        count: 200,
        ..Default::default()
    };
    let written = write_file(file.path(), &config, &mut rng()).unwrap();
    assert_eq!(written, 200);

    let mut store = ExpenseStore::in_memory();
    let report = store.load(file.path()).unwrap();
    assert_eq!(report.loaded, 200);
    assert!(report.skipped.is_empty());
    assert_eq!(store.next_serial(), 201);
}
