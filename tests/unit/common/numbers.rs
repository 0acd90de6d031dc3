//! Unit tests for human-readable numbers

use pumpwatch::common::numbers::{human_readable_number, parse_human_number};

#[test]
fn test_parse_suffixes() {
    assert_eq!(parse_human_number("5M").unwrap(), 5_000_000.0);
    assert_eq!(parse_human_number("100k").unwrap(), 100_000.0);
    assert_eq!(parse_human_number(" 2.5m ").unwrap(), 2_500_000.0);
    assert_eq!(parse_human_number("2500").unwrap(), 2500.0);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(parse_human_number("lots").is_err());
    assert!(parse_human_number("M").is_err());
    assert!(parse_human_number("").is_err());
}

#[test]
fn test_human_readable_number() {
    assert_eq!(human_readable_number(5_000_000.0), "5.0M");
    assert_eq!(human_readable_number(100_000.0), "100.0K");
    assert_eq!(human_readable_number(250.0), "250");
}
