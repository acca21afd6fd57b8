//! A comparator that requires the student's output to equal the expected output
//! once leading and trailing whitespace is removed from both.
//!
//! Nothing else is normalized: internal whitespace, letter case and number
//! formatting must match exactly. `"42\n"` matches `"42"`, `"42 0"` does not
//! match `"42  0"`.

use crate::traits::comparator::OutputComparator;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactComparator;

impl OutputComparator for ExactComparator {
    fn matches(&self, actual: Option<&str>, expected: Option<&str>) -> bool {
        actual.unwrap_or_default().trim() == expected.unwrap_or_default().trim()
    }
}
