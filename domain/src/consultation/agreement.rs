//! Agreement scoring over specialist confidences.
//!
//! The score is inversely proportional to the dispersion of the
//! specialists' confidence values. It looks only at the numbers: the
//! coordinator's own confidence and any textual disagreement between
//! assessments do not contribute.

/// Compute the agreement score (0-100) for a set of specialist confidences.
///
/// `round(max(0, 100 - population_std_dev))`. Depends only on the multiset
/// of values, so the order of `confidences` does not matter. An empty slice
/// has no dispersion and scores 100.
///
/// # Examples
///
/// ```
/// use consult_domain::consultation::agreement::agreement_score;
///
/// assert_eq!(agreement_score(&[80, 80, 80, 80, 80]), 100);
/// assert_eq!(agreement_score(&[0, 100, 0, 100, 0]), 51);
/// ```
pub fn agreement_score(confidences: &[u8]) -> u8 {
    if confidences.is_empty() {
        return 100;
    }

    let n = confidences.len() as f64;
    let mean = confidences.iter().map(|&c| f64::from(c)).sum::<f64>() / n;
    let variance = confidences
        .iter()
        .map(|&c| (f64::from(c) - mean).powi(2))
        .sum::<f64>()
        / n;

    (100.0 - variance.sqrt()).max(0.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_confidences_score_100() {
        assert_eq!(agreement_score(&[80, 80, 80, 80, 80]), 100);
        assert_eq!(agreement_score(&[0, 0]), 100);
        assert_eq!(agreement_score(&[42]), 100);
    }

    #[test]
    fn test_maximal_spread() {
        // mean 40, variance 2400, sqrt ~= 48.99
        assert_eq!(agreement_score(&[0, 100, 0, 100, 0]), 51);
        // mean 50, std dev 50
        assert_eq!(agreement_score(&[0, 100]), 50);
    }

    #[test]
    fn test_rounding() {
        // mean 75, variance 25, std dev 5
        assert_eq!(agreement_score(&[70, 80]), 95);
        // mean 80, variance 200/3, std dev ~= 8.16
        assert_eq!(agreement_score(&[70, 80, 90]), 92);
    }

    #[test]
    fn test_permutation_invariant() {
        let base = [85, 70, 90, 60, 75];
        let expected = agreement_score(&base);
        let permutations: [[u8; 5]; 4] = [
            [60, 70, 75, 85, 90],
            [90, 85, 75, 70, 60],
            [75, 60, 90, 70, 85],
            [70, 90, 60, 85, 75],
        ];
        for p in permutations {
            assert_eq!(agreement_score(&p), expected);
        }
    }

    #[test]
    fn test_always_in_range() {
        let cases: [&[u8]; 5] = [&[], &[100], &[0, 100], &[0, 0, 0, 100], &[3, 97, 50, 12]];
        for c in cases {
            assert!(agreement_score(c) <= 100);
        }
    }

    #[test]
    fn test_empty_is_full_agreement() {
        assert_eq!(agreement_score(&[]), 100);
    }
}
