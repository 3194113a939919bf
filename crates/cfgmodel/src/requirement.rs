//! Composite requirement checking against a count range.

use cfgmodel_range::Range;

/// One child predicate of a [`CompositeCheck`].
pub type CheckFn<V> = Box<dyn Fn(&V) -> bool + Send + Sync>;

/// Counts how many child checks a value satisfies and tests that count
/// against a range.
///
/// `Range::All` is special-cased here to mean "exactly all of them" rather
/// than "any count". That reading is a policy of this consuming layer, not of
/// the range type, which keeps `All` as the universal match.
pub struct CompositeCheck<V> {
    range: Range<i64>,
    checks: Vec<CheckFn<V>>,
}

impl<V> CompositeCheck<V> {
    pub fn new(range: Range<i64>) -> Self {
        Self {
            range,
            checks: Vec::new(),
        }
    }

    pub fn with_check(mut self, check: impl Fn(&V) -> bool + Send + Sync + 'static) -> Self {
        self.push(check);
        self
    }

    pub fn push(&mut self, check: impl Fn(&V) -> bool + Send + Sync + 'static) {
        self.checks.push(Box::new(check));
    }

    pub fn range(&self) -> &Range<i64> {
        &self.range
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn check(&self, data: &V) -> bool {
        let satisfied = self.checks.iter().filter(|check| check(data)).count() as i64;
        match &self.range {
            Range::All => satisfied == self.checks.len() as i64,
            range => range.is_within(satisfied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_with(range: Range<i64>) -> CompositeCheck<i64> {
        CompositeCheck::new(range)
            .with_check(|n| *n > 0)
            .with_check(|n| *n % 2 == 0)
            .with_check(|n| *n < 100)
    }

    #[test]
    fn all_means_every_check_not_any_count() {
        let check = check_with(Range::All);
        assert!(check.check(&4));
        assert!(!check.check(&3));
    }

    #[test]
    fn counted_range_matches_partial_satisfaction() {
        let check = check_with(Range::at_least(2));
        assert!(check.check(&3));
        assert!(!check.check(&-5));
    }
}
