//! Deterministic ordering and truncation for ranked reports.
//!
//! Primary key is population descending; the tie-break is the entity name
//! ascending under ICU collation, so ordering is linguistically correct
//! across character sets rather than raw byte order. A final byte-order
//! comparison keeps the order a strict total order even when the collator
//! considers two distinct names equivalent.

use crate::reports::row::{CityRow, CountryRow};
use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Rows that participate in population ranking.
pub trait Ranked {
    fn population(&self) -> u64;
    fn sort_name(&self) -> &str;
}

impl Ranked for CountryRow {
    fn population(&self) -> u64 {
        self.population
    }

    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl Ranked for CityRow {
    fn population(&self) -> u64 {
        self.population
    }

    fn sort_name(&self) -> &str {
        &self.name
    }
}

/// Process-wide collator. Immutable shared data, built once.
fn collator() -> &'static Collator {
    static COLLATOR: OnceLock<Collator> = OnceLock::new();
    COLLATOR.get_or_init(|| {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        Collator::try_new(&icu_locid::locale!("en").into(), options)
            .expect("compiled collation data ships with the binary")
    })
}

/// Collated name comparison with a byte-order fallback so that distinct
/// names never compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    match collator().compare(a, b) {
        Ordering::Equal => a.cmp(b),
        ord => ord,
    }
}

/// Filter by `scope`, then order by population descending with the collated
/// name tie-break. An empty result is a valid outcome.
pub fn rank<T, F>(rows: Vec<T>, scope: F) -> Vec<T>
where
    T: Ranked,
    F: Fn(&T) -> bool,
{
    let mut kept: Vec<T> = rows.into_iter().filter(|row| scope(row)).collect();
    kept.sort_by(|a, b| {
        b.population()
            .cmp(&a.population())
            .then_with(|| compare_names(a.sort_name(), b.sort_name()))
    });
    kept
}

/// Keep the first `min(n, len)` rows of an already-ranked list.
/// Non-positive `n` clamps to 1, uniformly across every call path.
pub fn top_n<T>(mut rows: Vec<T>, n: i64) -> Vec<T> {
    let keep = if n < 1 { 1 } else { n as usize };
    rows.truncate(keep);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str, population: u64) -> CityRow {
        CityRow {
            name: name.to_string(),
            country: "Testland".to_string(),
            district: None,
            population,
        }
    }

    fn names(rows: &[CityRow]) -> Vec<&str> {
        rows.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn population_descending_with_name_tie_break() {
        let rows = vec![city("Beta", 100), city("Alpha", 100), city("Zeta", 200)];
        let ranked = rank(rows, |_| true);
        assert_eq!(names(&ranked), vec!["Zeta", "Alpha", "Beta"]);
    }

    #[test]
    fn tie_break_uses_collation_not_byte_order() {
        // Byte order would put "Beta" (0x42) before "alpha" (0x61) and
        // "Zagreb" before "Évreux" (0xC3).
        let rows = vec![
            city("alpha", 10),
            city("Beta", 10),
            city("Zagreb", 10),
            city("Évreux", 10),
        ];
        let ranked = rank(rows, |_| true);
        assert_eq!(names(&ranked), vec!["alpha", "Beta", "Évreux", "Zagreb"]);
    }

    #[test]
    fn ranked_output_is_a_total_order() {
        let rows = vec![
            city("Delta", 50),
            city("Alpha", 50),
            city("Gamma", 90),
            city("Beta", 50),
        ];
        let ranked = rank(rows, |_| true);
        for pair in ranked.windows(2) {
            let ordered = pair[0].population > pair[1].population
                || (pair[0].population == pair[1].population
                    && compare_names(&pair[0].name, &pair[1].name) == Ordering::Less);
            assert!(ordered, "{} must precede {}", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn scope_predicate_filters_before_ordering() {
        let rows = vec![city("Keep", 10), city("Drop", 99)];
        let ranked = rank(rows, |row| row.name == "Keep");
        assert_eq!(names(&ranked), vec!["Keep"]);
    }

    #[test]
    fn empty_after_filtering_is_valid() {
        let rows = vec![city("Anything", 10)];
        let ranked = rank(rows, |_| false);
        assert!(ranked.is_empty());
    }

    #[test]
    fn top_n_clamps_non_positive_to_one() {
        let ranked = rank(
            vec![city("Low", 1), city("High", 9), city("Mid", 5)],
            |_| true,
        );
        let zero = top_n(ranked.clone(), 0);
        assert_eq!(names(&zero), vec!["High"]);
        let negative = top_n(ranked, -10);
        assert_eq!(names(&negative), vec!["High"]);
    }

    #[test]
    fn top_n_saturates_at_list_length() {
        let ranked = rank(vec![city("B", 1), city("A", 2)], |_| true);
        let all = top_n(ranked, 50);
        assert_eq!(names(&all), vec!["A", "B"]);
    }

    #[test]
    fn top_n_of_empty_list_is_empty() {
        let rows: Vec<CityRow> = Vec::new();
        assert!(top_n(rows, 0).is_empty());
    }
}
