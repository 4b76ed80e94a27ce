use std::{
    fmt::{Debug, Display},
    sync::Arc,
};

use num_traits::Bounded;
use tracing::{debug, trace};

use crate::{
    error::Error,
    interval::Interval,
    iter::{ContainsPruner, IntoIter, OverlapsPruner, PruningIter, Unpruned},
    node::{remove_recurse, Node},
};

/// A borrowed `(interval, payload)` tuple returned by [`IntervalTree`] queries.
pub type Match<'a, R, V> = (&'a Interval<R>, Option<&'a Arc<V>>);

/// An [`IntervalTree`] stores closed intervals `[low, high]`, each with an
/// optional shared payload, enabling efficient point containment and overlap
/// queries.
///
/// # Augmented AVL Tree
///
/// This [`IntervalTree`] is backed by an AVL tree keyed on the interval lower
/// bound, in which every node caches the maximum upper bound of its subtree.
/// Queries skip any subtree whose maximum upper bound is below the query, and
/// the tree is rebalanced during inserts and removals to keep the worst-case
/// depth logarithmic.
///
/// Multiple intervals may share a lower bound, and the same interval may be
/// stored more than once.
///
/// ## Payloads
///
/// Payloads are held as [`Arc`] handles, so a payload can outlive the node
/// that stores it if the caller retains a handle, and cloning the tree shares
/// (rather than copies) the payloads.
///
/// ## `R: Clone`
///
/// Tree nodes cache the subtree maximum upper bound, which requires the bound
/// type `R` to implement [`Clone`].
///
/// ## Concurrency
///
/// Mutation requires `&mut self`; callers sharing a tree between threads must
/// serialise access themselves (for example with a `Mutex`).
#[derive(Debug)]
pub struct IntervalTree<R, V> {
    root: Option<Box<Node<R, V>>>,
    len: usize,
}

impl<R, V> Default for IntervalTree<R, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<R, V> Clone for IntervalTree<R, V>
where
    R: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<R, V> IntervalTree<R, V> {
    /// Construct an empty [`IntervalTree`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of intervals stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove all intervals from the tree.
    ///
    /// Payloads not retained elsewhere by the caller are dropped.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing interval tree");
        self.root = None;
        self.len = 0;
    }

    /// Iterate over all `(interval, payload)` tuples in ascending order of the
    /// interval lower bound.
    ///
    /// Intervals sharing a lower bound are yielded in an unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Match<'_, R, V>> {
        PruningIter::new(self.root.as_deref(), Unpruned).map(|v| (v.interval(), v.payload()))
    }
}

impl<R, V> IntervalTree<R, V>
where
    R: Ord + Clone + Debug,
{
    /// Insert the closed interval `[low, high]` with an optional `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `low > high`, leaving the tree
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use aitree::{Error, IntervalTree};
    /// use std::sync::Arc;
    ///
    /// let mut t = IntervalTree::new();
    /// t.insert(1, 3, Some(Arc::new("bananas"))).unwrap();
    ///
    /// assert_eq!(t.insert(5, 2, None), Err(Error::InvalidInterval));
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn insert(&mut self, low: R, high: R, payload: Option<Arc<V>>) -> Result<(), Error> {
        self.insert_interval(Interval::new(low, high), payload)
    }

    /// Insert `interval` with an optional `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if the interval lower bound is
    /// greater than its upper bound, leaving the tree unchanged.
    pub fn insert_interval(
        &mut self,
        interval: Interval<R>,
        payload: Option<Arc<V>>,
    ) -> Result<(), Error> {
        if !interval.is_valid() {
            debug!(?interval, "rejecting invalid interval");
            return Err(Error::InvalidInterval);
        }

        trace!(?interval, "insert");
        match self.root {
            Some(ref mut v) => v.insert(interval, payload),
            None => self.root = Some(Box::new(Node::new(interval, payload))),
        }
        self.len += 1;

        Ok(())
    }

    /// Remove one interval whose lower bound equals `interval.low()`,
    /// returning the removed interval and its payload.
    ///
    /// The upper bound of `interval` is not used to select the node: when
    /// several stored intervals share the lower bound, any one of them may be
    /// removed.
    ///
    /// Removal only proceeds if at least one stored interval contains the
    /// point `interval.low()`; otherwise [`None`] is returned and the tree is
    /// unchanged. A stored interval always contains its own lower bound, so
    /// this check never prevents removing an interval whose lower bound
    /// matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use aitree::{Interval, IntervalTree};
    ///
    /// let mut t = IntervalTree::<_, ()>::new();
    /// t.insert(5, 8, None).unwrap();
    ///
    /// // Selected by the lower bound alone.
    /// let (removed, _) = t.remove(&Interval::new(5, 100)).unwrap();
    /// assert_eq!(removed, Interval::new(5, 8));
    /// assert!(t.is_empty());
    /// ```
    pub fn remove(&mut self, interval: &Interval<R>) -> Option<(Interval<R>, Option<Arc<V>>)> {
        if !self.contains(interval.low()) {
            debug!(?interval, "no interval contains the lower bound, skipping removal");
            return None;
        }

        let Some(removed) = remove_recurse(&mut self.root, interval.low()) else {
            debug!(?interval, "no interval with a matching lower bound");
            return None;
        };

        trace!(removed = ?removed.0, "remove");
        self.len -= 1;
        Some(removed)
    }

    /// Replace `old` with `new`, equivalent to calling
    /// [`IntervalTree::remove()`] with `old` and then inserting `new` with
    /// `payload`.
    ///
    /// The removal follows the same lower bound matching rules as
    /// [`IntervalTree::remove()`], and `new` is inserted even if nothing was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `new` is not a valid interval.
    /// The tree is left unchanged.
    pub fn update(
        &mut self,
        old: &Interval<R>,
        new: Interval<R>,
        payload: Option<Arc<V>>,
    ) -> Result<(), Error> {
        if !new.is_valid() {
            debug!(?old, ?new, "rejecting invalid update interval");
            return Err(Error::InvalidInterval);
        }

        self.remove(old);
        self.insert_interval(new, payload)
    }
}

impl<R, V> IntervalTree<R, V>
where
    R: Ord,
{
    /// Return all intervals containing `value` (`low <= value <= high`).
    ///
    /// The results are ordered by lower bound, though callers should not rely
    /// on the order of intervals sharing a lower bound.
    pub fn containing(&self, value: &R) -> Vec<Match<'_, R, V>> {
        self.containing_iter(value)
            .map(|v| (v.interval(), v.payload()))
            .collect()
    }

    /// Return all intervals sharing at least one point with `[low, high]`
    /// (`interval.low <= high && interval.high >= low`).
    ///
    /// # Examples
    ///
    /// ```
    /// use aitree::{Interval, IntervalTree};
    ///
    /// let mut t = IntervalTree::<_, ()>::new();
    /// for (low, high) in [(1, 3), (5, 8), (2, 6), (15, 20)] {
    ///     t.insert(low, high, None).unwrap();
    /// }
    ///
    /// let got = t
    ///     .overlapping(&4, &5)
    ///     .into_iter()
    ///     .map(|(i, _)| i.clone())
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(got, [Interval::new(2, 6), Interval::new(5, 8)]);
    /// ```
    pub fn overlapping(&self, low: &R, high: &R) -> Vec<Match<'_, R, V>> {
        self.overlapping_iter(low, high)
            .map(|v| (v.interval(), v.payload()))
            .collect()
    }

    /// Return the largest upper bound of the intervals overlapping
    /// `[low, high]`, or [`None`] if no interval overlaps.
    pub fn max_high_overlapping(&self, low: &R, high: &R) -> Option<&R> {
        self.overlapping_iter(low, high)
            .map(|v| v.interval().high())
            .max()
    }

    /// As [`IntervalTree::max_high_overlapping()`], but returns
    /// [`Bounded::min_value()`] when no interval overlaps `[low, high]`.
    ///
    /// The sentinel cannot be distinguished from a stored upper bound equal to
    /// the type minimum; prefer [`IntervalTree::max_high_overlapping()`] when
    /// such bounds are possible.
    ///
    /// Bound types without a [`Bounded`] implementation (such as [`char`])
    /// can use [`IntervalTree::max_high_overlapping()`] with
    /// [`Option::unwrap_or()`] instead.
    pub fn max_high_overlapping_or_min(&self, low: &R, high: &R) -> R
    where
        R: Bounded + Clone,
    {
        self.max_high_overlapping(low, high)
            .cloned()
            .unwrap_or_else(R::min_value)
    }

    /// Return all intervals with `high >= min` and `low <= max`.
    ///
    /// This is the set of intervals overlapping the range `[min, max]`.
    pub fn find_by_min_max(&self, min: &R, max: &R) -> Vec<Match<'_, R, V>> {
        self.overlapping(min, max)
    }

    /// Returns true if any interval contains `value`.
    pub fn contains(&self, value: &R) -> bool {
        self.containing_iter(value).next().is_some()
    }

    /// Returns true if any interval overlaps `[low, high]`.
    pub fn overlaps(&self, low: &R, high: &R) -> bool {
        self.overlapping_iter(low, high).next().is_some()
    }

    fn containing_iter<'a, 'q>(
        &'a self,
        point: &'q R,
    ) -> PruningIter<'a, R, V, ContainsPruner<'q, R>> {
        PruningIter::new(self.root.as_deref(), ContainsPruner { point })
    }

    fn overlapping_iter<'a, 'q>(
        &'a self,
        low: &'q R,
        high: &'q R,
    ) -> PruningIter<'a, R, V, OverlapsPruner<'q, R>> {
        PruningIter::new(self.root.as_deref(), OverlapsPruner { low, high })
    }
}

/// Renders every interval as `"[low, high] "` in ascending lower bound order.
impl<R, V> Display for IntervalTree<R, V>
where
    R: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (interval, _) in self.iter() {
            write!(f, "{interval} ")?;
        }
        Ok(())
    }
}

impl<R, V> IntoIterator for IntervalTree<R, V> {
    type Item = (Interval<R>, Option<Arc<V>>);
    type IntoIter = IntoIter<R, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root)
    }
}
