use std::{cmp::Ordering, fmt::Display, ops::RangeInclusive};

/// A closed interval `[low, high]` over a totally ordered bound type `R`.
///
/// An [`Interval`] can be constructed with `low > high`, but such an interval
/// is rejected when inserted into an [`IntervalTree`].
///
/// [`Interval`] instances are ordered by their lower bound, tie-broken by the
/// upper bound.
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<R> {
    low: R,
    high: R,
}

impl<R> Interval<R> {
    /// Construct a new `[low, high]` interval.
    ///
    /// No validation is performed.
    pub const fn new(low: R, high: R) -> Self {
        Self { low, high }
    }

    /// The (inclusive) lower bound.
    pub fn low(&self) -> &R {
        &self.low
    }

    /// The (inclusive) upper bound.
    pub fn high(&self) -> &R {
        &self.high
    }

    /// Explode this [`Interval`] into its `(low, high)` bounds.
    pub fn into_inner(self) -> (R, R) {
        (self.low, self.high)
    }
}

impl<R> Interval<R>
where
    R: Ord,
{
    /// Returns true when `low <= high`.
    pub fn is_valid(&self) -> bool {
        self.low <= self.high
    }

    /// Returns true if `value` lies within `[low, high]`.
    pub fn contains_point(&self, value: &R) -> bool {
        self.low <= *value && *value <= self.high
    }

    /// Returns true if this interval shares at least one point with the closed
    /// range `[low, high]`.
    pub fn overlaps(&self, low: &R, high: &R) -> bool {
        self.low <= *high && self.high >= *low
    }
}

impl<R> PartialOrd for Interval<R>
where
    R: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R> Ord for Interval<R>
where
    R: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // The lower bound is the primary ordering value, falling back to the
        // upper bound when the lower bounds are equal.
        match self.low.cmp(&other.low) {
            Ordering::Equal => self.high.cmp(&other.high),
            v => v,
        }
    }
}

impl<R> From<(R, R)> for Interval<R> {
    fn from((low, high): (R, R)) -> Self {
        Self::new(low, high)
    }
}

impl<R> From<RangeInclusive<R>> for Interval<R> {
    fn from(value: RangeInclusive<R>) -> Self {
        let (low, high) = value.into_inner();
        Self::new(low, high)
    }
}

impl<R> Display for Interval<R>
where
    R: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}
