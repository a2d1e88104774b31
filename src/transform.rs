//! Normalization and filtering stages.
//!
//! All functions here are pure: they borrow their input and return a new
//! [`RecordSet`], leaving the input untouched.

use crate::record::{Record, RecordSet};

/// Trim every field and fold it to uppercase.
///
/// Output has one record per input record, each with the same field count.
pub fn transform(records: &[Record]) -> RecordSet {
    records
        .iter()
        .map(|r| r.map_fields(|f| f.trim().to_uppercase()))
        .collect()
}

/// Keep records with at least `min_fields` fields, preserving order.
///
/// Zero or negative `min_fields` keeps everything.
pub fn filter_by_field_count(records: &[Record], min_fields: i64) -> RecordSet {
    let min = usize::try_from(min_fields.max(0)).unwrap_or(usize::MAX);
    records
        .iter()
        .filter(|r| r.field_count() >= min)
        .cloned()
        .collect()
}

pub fn aggregate_count(records: &[Record]) -> usize {
    records.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fields: &[&str]) -> Record {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_transform_trims_and_uppercases() {
        let input = vec![rec(&[" john ", "doe", " 30", "engineer "])];
        let out = transform(&input);
        assert_eq!(out, vec![rec(&["JOHN", "DOE", "30", "ENGINEER"])]);
    }

    #[test]
    fn test_transform_preserves_shape() {
        let input = vec![rec(&["a"]), rec(&["b", "c", "d"]), rec(&[])];
        let out = transform(&input);
        assert_eq!(out.len(), input.len());
        for (before, after) in input.iter().zip(&out) {
            assert_eq!(before.field_count(), after.field_count());
        }
    }

    #[test]
    fn test_transform_does_not_mutate_input() {
        let input = vec![rec(&[" x "])];
        let _ = transform(&input);
        assert_eq!(input, vec![rec(&[" x "])]);
    }

    #[test]
    fn test_transform_order_of_trim_and_upper_is_irrelevant() {
        let input = vec![rec(&["\t mixed Case \n", "ß", "  "])];
        let out = transform(&input);
        for (raw, normalized) in input[0].iter().zip(out[0].iter()) {
            assert_eq!(normalized, raw.to_uppercase().trim());
        }
    }

    #[test]
    fn test_transform_whitespace_field_becomes_empty() {
        let out = transform(&[rec(&["a", "   "])]);
        assert_eq!(out[0], rec(&["A", ""]));
    }

    #[test]
    fn test_filter_keeps_at_least_min() {
        let input = vec![rec(&["a"]), rec(&["a", "b"]), rec(&["a", "b", "c"])];
        let out = filter_by_field_count(&input, 2);
        assert_eq!(out, vec![rec(&["a", "b"]), rec(&["a", "b", "c"])]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let input = vec![rec(&["1", "x"]), rec(&["2"]), rec(&["3", "y"]), rec(&["4", "z"])];
        let out = filter_by_field_count(&input, 2);
        let firsts: Vec<_> = out.iter().filter_map(|r| r.field(0)).collect();
        assert_eq!(firsts, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_filter_zero_or_negative_keeps_all() {
        let input = vec![rec(&[]), rec(&["a"])];
        assert_eq!(filter_by_field_count(&input, 0), input);
        assert_eq!(filter_by_field_count(&input, -5), input);
    }

    #[test]
    fn test_filter_min_one_drops_fieldless_records() {
        let input = vec![rec(&[]), rec(&["a"])];
        assert_eq!(filter_by_field_count(&input, 1), vec![rec(&["a"])]);
    }

    #[test]
    fn test_filter_never_truncates_fields() {
        let input = vec![rec(&["a", "b", "c", "d"])];
        let out = filter_by_field_count(&input, 1);
        assert_eq!(out[0].field_count(), 4);
    }

    #[test]
    fn test_aggregate_count() {
        assert_eq!(aggregate_count(&[]), 0);
        assert_eq!(aggregate_count(&[rec(&["a"]), rec(&["b"])]), 2);
    }
}
