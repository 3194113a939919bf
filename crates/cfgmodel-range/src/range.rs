//! [`Range`]: a predicate over a totally ordered type.

use std::cmp::Ordering;

/// A range or set of comparable values, usually numbers.
///
/// Membership is a pure function of the variant's fields and the tested
/// value; every variant requires the value type to be totally ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum Range<T> {
    /// Matches every value.
    All,
    /// Matches exactly one value.
    Exact(T),
    /// Matches any value in a fixed set.
    Roster(Vec<T>),
    /// One-sided comparison: `>`, `>=`, `<`, or `<=` per the flags.
    Comparison {
        value: T,
        greater: bool,
        inclusive: bool,
    },
    /// Two-sided interval; each bound is independently open or closed.
    Interval {
        lower: T,
        upper: T,
        lower_open: bool,
        upper_open: bool,
    },
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn all() -> Self {
        Range::All
    }

    pub fn exactly(value: T) -> Self {
        Range::Exact(value)
    }

    pub fn in_set(values: impl IntoIterator<Item = T>) -> Self {
        Range::Roster(values.into_iter().collect())
    }

    pub fn less_than(value: T) -> Self {
        Range::Comparison {
            value,
            greater: false,
            inclusive: false,
        }
    }

    pub fn greater_than(value: T) -> Self {
        Range::Comparison {
            value,
            greater: true,
            inclusive: false,
        }
    }

    pub fn at_most(value: T) -> Self {
        Range::Comparison {
            value,
            greater: false,
            inclusive: true,
        }
    }

    pub fn at_least(value: T) -> Self {
        Range::Comparison {
            value,
            greater: true,
            inclusive: true,
        }
    }

    /// `(lower, upper)`, both bounds excluded.
    pub fn open_interval(lower: T, upper: T) -> Self {
        Range::Interval {
            lower,
            upper,
            lower_open: true,
            upper_open: true,
        }
    }

    /// `[lower, upper]`, both bounds included.
    pub fn closed_interval(lower: T, upper: T) -> Self {
        Range::Interval {
            lower,
            upper,
            lower_open: false,
            upper_open: false,
        }
    }

    /// `(lower, upper]`.
    pub fn open_closed_interval(lower: T, upper: T) -> Self {
        Range::Interval {
            lower,
            upper,
            lower_open: true,
            upper_open: false,
        }
    }

    /// `[lower, upper)`.
    pub fn closed_open_interval(lower: T, upper: T) -> Self {
        Range::Interval {
            lower,
            upper,
            lower_open: false,
            upper_open: true,
        }
    }

    /// Whether the value is considered within the range.
    pub fn is_within(&self, value: T) -> bool {
        match self {
            Range::All => true,
            Range::Exact(expected) => value.partial_cmp(expected) == Some(Ordering::Equal),
            Range::Roster(values) => values
                .iter()
                .any(|member| value.partial_cmp(member) == Some(Ordering::Equal)),
            Range::Comparison {
                value: bound,
                greater,
                inclusive,
            } => match value.partial_cmp(bound) {
                Some(Ordering::Equal) => *inclusive,
                Some(Ordering::Greater) => *greater,
                Some(Ordering::Less) => !*greater,
                None => false,
            },
            Range::Interval {
                lower,
                upper,
                lower_open,
                upper_open,
            } => {
                let above = match value.partial_cmp(lower) {
                    Some(Ordering::Greater) => true,
                    Some(Ordering::Equal) => !*lower_open,
                    _ => false,
                };
                let below = match value.partial_cmp(upper) {
                    Some(Ordering::Less) => true,
                    Some(Ordering::Equal) => !*upper_open,
                    _ => false,
                };
                above && below
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_membership() {
        let gt = Range::greater_than(1);
        assert!(gt.is_within(2));
        assert!(!gt.is_within(1));

        let le = Range::at_most(1);
        assert!(le.is_within(1));
        assert!(le.is_within(0));
        assert!(!le.is_within(2));
    }

    #[test]
    fn interval_bound_combinations_are_distinct() {
        assert!(Range::closed_interval(0, 2).is_within(0));
        assert!(Range::closed_interval(0, 2).is_within(2));
        assert!(!Range::open_interval(0, 2).is_within(0));
        assert!(!Range::open_interval(0, 2).is_within(2));
        assert!(Range::open_closed_interval(0, 2).is_within(2));
        assert!(!Range::open_closed_interval(0, 2).is_within(0));
        assert!(Range::closed_open_interval(0, 2).is_within(0));
        assert!(!Range::closed_open_interval(0, 2).is_within(2));
    }
}
