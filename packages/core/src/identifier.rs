//! Letter and reference number generation.
//!
//! Generation is a pure function of the category prefix, the date, and a
//! random suffix; it makes no uniqueness promise. The documents service owns
//! uniqueness: the storage layer's unique index on `letter_number` is the
//! authoritative duplicate signal and creation retries generation a bounded
//! number of times before giving up.

use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// Maximum times the caller should regenerate after a duplicate collision
pub const MAX_GENERATION_ATTEMPTS: u32 = 5;

/// Produce a letter number of the form `{prefix}/{year}/{NNN}`
pub fn generate_letter_number(prefix: &str, date: NaiveDate) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("{}/{}/{:03}", prefix, date.year(), suffix)
}

/// Produce a reference number of the form `REF/{prefix}/{MMYYYY}/{NN}`
pub fn generate_reference_number(prefix: &str, date: NaiveDate) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..100);
    format!(
        "REF/{}/{:02}{:04}/{:02}",
        prefix,
        date.month(),
        date.year(),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_letter_number_format() {
        let pattern = Regex::new(r"^EMP/2025/\d{3}$").unwrap();
        for _ in 0..50 {
            let number = generate_letter_number("EMP", date(2025, 3, 14));
            assert!(pattern.is_match(&number), "bad letter number: {}", number);
        }
    }

    #[test]
    fn test_reference_number_format() {
        let pattern = Regex::new(r"^REF/EMP/032025/\d{2}$").unwrap();
        for _ in 0..50 {
            let number = generate_reference_number("EMP", date(2025, 3, 14));
            assert!(pattern.is_match(&number), "bad reference number: {}", number);
        }
    }

    #[test]
    fn test_reference_number_pads_month() {
        let number = generate_reference_number("CIR", date(2026, 1, 2));
        assert!(number.starts_with("REF/CIR/012026/"));
    }

    #[test]
    fn test_suffix_stays_in_range() {
        for _ in 0..200 {
            let number = generate_letter_number("HR", date(2025, 6, 1));
            let suffix: u32 = number.rsplit('/').next().unwrap().parse().unwrap();
            assert!(suffix < 1000);
        }
    }
}
