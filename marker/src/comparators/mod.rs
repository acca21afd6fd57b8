//! # Comparators
//!
//! Implementations of [`OutputComparator`](crate::traits::comparator::OutputComparator).
//!
//! - [`exact_comparator`]: exact equality after trimming both ends.

pub mod exact_comparator;
