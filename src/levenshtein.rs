//! Levenshtein (edit) distance.
//!
//! Classic single-row dynamic programming over characters: insertions,
//! deletions, and substitutions each cost 1. Catalog names are short
//! (< 120 chars), so the O(|a|·|b|) DP is more than fast enough; a bounded
//! variant with early termination backs the strategies that only care about
//! small distances.

use smallvec::SmallVec;

/// Compute the Levenshtein distance between two strings.
///
/// Deterministic and symmetric in value: `distance(a, b) == distance(b, a)`.
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    dp_distance(&a, &b)
}

/// Compute the Levenshtein distance if it does not exceed `max_distance`.
///
/// The length-difference lower bound skips the DP entirely for strings that
/// cannot be within the bound; otherwise the full distance is computed and
/// checked against it.
#[must_use]
pub fn distance_within(a: &str, b: &str, max_distance: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Length difference is a lower bound on the distance.
    if a.len().abs_diff(b.len()) > max_distance {
        return None;
    }

    let d = dp_distance(&a, &b);
    if d <= max_distance {
        Some(d)
    } else {
        None
    }
}

/// Single-row DP over char slices.
fn dp_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Keep the shorter string on the column axis so the row stays small.
    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = usize::from(sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitten_sitting() {
        assert_eq!(distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_identity() {
        for s in ["", "a", "bengaluru", "institute of technology"] {
            assert_eq!(distance(s, s), 0);
        }
    }

    #[test]
    fn test_symmetry() {
        let pairs = [("kitten", "sitting"), ("govt", "government"), ("", "abc")];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a));
        }
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", ""), 0);
    }

    #[test]
    fn test_single_edits() {
        assert_eq!(distance("engineering", "enginering"), 1); // deletion
        assert_eq!(distance("tech", "teck"), 1); // substitution
        assert_eq!(distance("inst", "insst"), 1); // insertion
    }

    #[test]
    fn test_unicode_chars_count_as_one() {
        assert_eq!(distance("école", "ecole"), 1);
    }

    #[test]
    fn test_bounded_within() {
        assert_eq!(distance_within("kitten", "sitting", 3), Some(3));
        assert_eq!(distance_within("kitten", "sitting", 2), None);
        assert_eq!(distance_within("abc", "abc", 0), Some(0));
    }

    #[test]
    fn test_bounded_length_shortcut() {
        // Length difference alone exceeds the bound.
        assert_eq!(distance_within("ab", "abcdefgh", 2), None);
    }
}
