//! # Scorer Module
//!
//! Equal-weight scoring: every test case is worth `marks / total`.

/// Score for `passed` of `total` test cases on a problem worth `marks`.
///
/// The ratio is scaled to `marks` and rounded half-to-even, so 2.5 becomes 2
/// and 3.5 becomes 4. A problem with no test cases scores 0. The result never
/// exceeds `marks`.
///
/// # Example
///
/// ```
/// use marker::scorer::compute_score;
///
/// assert_eq!(compute_score(2, 2, 10), 10);
/// assert_eq!(compute_score(1, 3, 10), 3);
/// assert_eq!(compute_score(0, 0, 10), 0);
/// ```
pub fn compute_score(passed: usize, total: usize, marks: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let raw = passed as f64 / total as f64 * f64::from(marks);
    raw.round_ties_even().clamp(0.0, f64::from(marks)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_none() {
        assert_eq!(compute_score(4, 4, 10), 10);
        assert_eq!(compute_score(0, 4, 10), 0);
    }

    #[test]
    fn test_zero_tests_scores_zero() {
        assert_eq!(compute_score(0, 0, 100), 0);
    }

    #[test]
    fn test_rounds_half_to_even() {
        // 1/4 * 10 = 2.5, 3/4 * 10 = 7.5, 1/2 * 5 = 2.5
        assert_eq!(compute_score(1, 4, 10), 2);
        assert_eq!(compute_score(3, 4, 10), 8);
        assert_eq!(compute_score(1, 2, 5), 2);
        assert_eq!(compute_score(1, 2, 7), 4);
    }

    #[test]
    fn test_rounds_to_nearest() {
        assert_eq!(compute_score(2, 3, 10), 7);
        assert_eq!(compute_score(1, 3, 10), 3);
        assert_eq!(compute_score(1, 6, 1), 0);
    }

    #[test]
    fn test_never_exceeds_marks() {
        assert_eq!(compute_score(5, 3, 10), 10);
    }
}
