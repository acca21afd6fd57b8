/// OutputComparator is a strategy trait for judging a program's output.
///
/// A missing value on either side counts as the empty string.
pub trait OutputComparator: Send + Sync {
    fn matches(&self, actual: Option<&str>, expected: Option<&str>) -> bool;
}
