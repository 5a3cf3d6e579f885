//! Shared helpers for the chart selectors.
//!
//! - Shannon entropy of category frequencies
//! - Ordinal detection for categorical columns

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// Column-name fragments that imply an ordered scale - compiled once at startup
static ORDINAL_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(rating|level|grade|score|rank|priority|stage|tier|scale|phase|severity|step|degree|quarter|satisfaction)",
    )
    .expect("Invalid regex: ordinal keywords")
});

static INTEGER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-+]?\d+\s*$").expect("Invalid regex: integer label"));

/// Most categories for which single-character labels count as ordinal.
const SHORT_LABEL_MAX_CATEGORIES: usize = 10;

// =============================================================================
// Entropy
// =============================================================================

/// Shannon entropy (bits) of a frequency table, over observed categories.
///
/// Returns `None` for an empty or all-zero table.
pub fn shannon_entropy(frequencies: &BTreeMap<String, u64>) -> Option<f64> {
    let total: u64 = frequencies.values().sum();
    if total == 0 {
        return None;
    }

    let total = total as f64;
    let entropy = frequencies
        .values()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>();

    Some(entropy)
}

/// Entropy of a perfectly uniform distribution over `unique_values` categories.
#[inline]
pub fn uniform_entropy(unique_values: u64) -> f64 {
    if unique_values <= 1 {
        0.0
    } else {
        (unique_values as f64).log2()
    }
}

// =============================================================================
// Ordinal Detection
// =============================================================================

/// Judge whether a categorical column has a natural order.
pub fn is_ordinal(column_name: &str, frequencies: Option<&BTreeMap<String, u64>>) -> bool {
    if ORDINAL_NAME_PATTERN.is_match(column_name) {
        return true;
    }

    let Some(frequencies) = frequencies else {
        return false;
    };
    let labels: Vec<&str> = frequencies.keys().map(String::as_str).collect();

    is_consecutive_integer_run(&labels) || is_consecutive_char_run(&labels)
}

/// Labels that parse as integers forming a gap-free run, e.g. 1..=5.
fn is_consecutive_integer_run(labels: &[&str]) -> bool {
    if labels.len() < 2 || !labels.iter().all(|l| INTEGER_LABEL.is_match(l)) {
        return false;
    }

    let mut values: Vec<i64> = match labels.iter().map(|l| l.trim().parse::<i64>()).collect() {
        Ok(values) => values,
        Err(_) => return false,
    };
    values.sort_unstable();

    values
        .windows(2)
        .all(|pair| pair[0].checked_add(1) == Some(pair[1]))
}

/// A handful of single-character labels forming a gap-free run of code
/// points, e.g. A-E.
fn is_consecutive_char_run(labels: &[&str]) -> bool {
    if labels.len() < 2 || labels.len() > SHORT_LABEL_MAX_CATEGORIES {
        return false;
    }

    let mut chars = Vec::with_capacity(labels.len());
    for label in labels {
        let mut it = label.chars();
        match (it.next(), it.next()) {
            (Some(c), None) => chars.push(u32::from(c)),
            _ => return false,
        }
    }
    chars.sort_unstable();

    chars
        .windows(2)
        .all(|pair| pair[0].checked_add(1) == Some(pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_entropy_even_split() {
        let freq = table(&[("a", 25), ("b", 25), ("c", 25), ("d", 25)]);
        let entropy = shannon_entropy(&freq).unwrap();
        assert!((entropy - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_single_category() {
        let freq = table(&[("only", 40)]);
        assert_eq!(shannon_entropy(&freq), Some(0.0));
    }

    #[test]
    fn test_entropy_ignores_zero_counts() {
        let freq = table(&[("a", 50), ("b", 50), ("c", 0)]);
        assert!((shannon_entropy(&freq).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_empty_table() {
        assert_eq!(shannon_entropy(&BTreeMap::new()), None);
        assert_eq!(shannon_entropy(&table(&[("a", 0)])), None);
    }

    #[test]
    fn test_uniform_entropy() {
        assert_eq!(uniform_entropy(0), 0.0);
        assert_eq!(uniform_entropy(1), 0.0);
        assert!((uniform_entropy(8) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ordinal_by_name() {
        assert!(is_ordinal("customer_rating", None));
        assert!(is_ordinal("Priority", None));
        assert!(is_ordinal("education_level", None));
        assert!(!is_ordinal("city", None));
    }

    #[test]
    fn test_ordinal_by_integer_run() {
        let freq = table(&[("1", 3), ("2", 4), ("3", 1), ("4", 9)]);
        assert!(is_ordinal("answer", Some(&freq)));

        let gapped = table(&[("1", 3), ("3", 4), ("10", 1)]);
        assert!(!is_ordinal("answer", Some(&gapped)));
    }

    #[test]
    fn test_ordinal_by_short_labels() {
        let freq = table(&[("A", 3), ("B", 4), ("C", 1)]);
        assert!(is_ordinal("answer", Some(&freq)));

        let long = table(&[("north", 3), ("south", 4)]);
        assert!(!is_ordinal("region", Some(&long)));
    }

    #[test]
    fn test_integer_run_with_extreme_labels() {
        let freq = table(&[("-5000000000000000000", 3), ("5000000000000000000", 4)]);
        assert!(!is_ordinal("code", Some(&freq)));

        let (max, below_max, min) = (
            i64::MAX.to_string(),
            (i64::MAX - 1).to_string(),
            i64::MIN.to_string(),
        );
        let edge = table(&[(max.as_str(), 1), (below_max.as_str(), 1)]);
        assert!(is_ordinal("code", Some(&edge)));

        let wide = table(&[(min.as_str(), 1), (max.as_str(), 1)]);
        assert!(!is_ordinal("code", Some(&wide)));
    }

    #[test]
    fn test_unordered_single_char_labels() {
        let gender = table(&[("M", 48), ("F", 52)]);
        assert!(!is_ordinal("gender", Some(&gender)));

        let answer = table(&[("Y", 10), ("N", 7), ("?", 2)]);
        assert!(!is_ordinal("answer", Some(&answer)));

        let single = table(&[("A", 10)]);
        assert!(!is_ordinal("answer", Some(&single)));
    }
}
