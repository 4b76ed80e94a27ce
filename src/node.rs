use std::{cmp::Ordering, sync::Arc};

use tracing::trace;

use crate::interval::Interval;

/// An `(interval, payload)` tuple extracted from the tree.
pub(crate) type Extracted<R, V> = (Interval<R>, Option<Arc<V>>);

#[derive(Debug)]
pub(crate) struct Node<R, V> {
    /// Child nodes pointers.
    left: Option<Box<Node<R, V>>>,
    right: Option<Box<Node<R, V>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1, an absent child counts as 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    /// The maximum upper bound of all intervals for the subtree rooted at this
    /// [`Node`].
    subtree_max: R,

    interval: Interval<R>,
    payload: Option<Arc<V>>,
}

impl<R, V> Clone for Node<R, V>
where
    R: Clone,
{
    // Payloads are shared with the clone, not deep-copied.
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            height: self.height,
            subtree_max: self.subtree_max.clone(),
            interval: self.interval.clone(),
            payload: self.payload.clone(),
        }
    }
}

impl<R, V> Node<R, V> {
    pub(crate) fn new(interval: Interval<R>, payload: Option<Arc<V>>) -> Self
    where
        R: Clone,
    {
        Self {
            subtree_max: interval.high().clone(),
            interval,
            payload,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Insert `interval` into the subtree rooted at `self`, keyed on the lower
    /// bound.
    ///
    /// Intervals with a lower bound equal to an existing node are placed in
    /// the right subtree of that node.
    pub(crate) fn insert(self: &mut Box<Self>, interval: Interval<R>, payload: Option<Arc<V>>)
    where
        R: Ord + Clone,
    {
        let child = if interval.low() < self.interval.low() {
            &mut self.left
        } else {
            &mut self.right
        };

        match child {
            Some(v) => v.insert(interval, payload),
            None => {
                // Insert the value as a new immediate descendent of self.
                *child = Some(Box::new(Self::new(interval, payload)));

                // A single new leaf cannot skew this node beyond a balance
                // factor of 1 in the direction of the new addition.
                update_height(self);
                update_subtree_max(self);
                return;
            }
        };

        // Determine the balance factor of the subtree rooted at self and
        // correct it if the absolute difference in height between branches is
        // > 1.
        rebalance(self);
    }

    pub(crate) fn interval(&self) -> &Interval<R> {
        &self.interval
    }

    pub(crate) fn payload(&self) -> Option<&Arc<V>> {
        self.payload.as_ref()
    }

    pub(crate) fn subtree_max(&self) -> &R {
        &self.subtree_max
    }

    #[cfg(test)]
    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Explode this [`Node`] into the [`Interval`] and payload it contains.
    pub(crate) fn into_tuple(self) -> Extracted<R, V> {
        (self.interval, self.payload)
    }
}

fn height<R, V>(n: Option<&Node<R, V>>) -> u8 {
    n.map(|v| v.height).unwrap_or_default()
}

fn update_height<R, V>(n: &mut Node<R, V>) {
    n.height = height(n.left()).max(height(n.right())) + 1;
}

/// Recompute the subtree max of `n` from its own upper bound and the subtree
/// max of each child.
///
/// The children must already hold correct values.
fn update_subtree_max<R, V>(n: &mut Node<R, V>)
where
    R: Ord + Clone,
{
    let new_max = n
        .left()
        .map(|v| v.subtree_max())
        .max(n.right().map(|v| v.subtree_max()))
        .max(Some(n.interval().high()));

    if let Some(new_max) = new_max {
        n.subtree_max = new_max.clone();
    }
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
fn balance<R, V>(n: &Node<R, V>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.left()) as i16 - height(n.right()) as i16) as i8
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// A no-op if `x` has no right child.
fn rotate_left<R, V>(x: &mut Box<Node<R, V>>)
where
    R: Ord + Clone,
{
    debug_assert!(x.right.is_some(), "left rotation without a right child");
    let Some(mut p) = x.right.take() else {
        return;
    };
    trace!("rotate left");
    std::mem::swap(x, &mut p);

    // The demoted node is updated first, as the new subtree root's max
    // depends on it.
    p.right = x.left.take();
    update_height(&mut p);
    update_subtree_max(&mut p);

    x.left = Some(p);
    update_height(x);
    update_subtree_max(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// A no-op if `y` has no left child.
fn rotate_right<R, V>(y: &mut Box<Node<R, V>>)
where
    R: Ord + Clone,
{
    debug_assert!(y.left.is_some(), "right rotation without a left child");
    let Some(mut p) = y.left.take() else {
        return;
    };
    trace!("rotate right");
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);
    update_subtree_max(&mut p);

    y.right = Some(p);
    update_height(y);
    update_subtree_max(y);
}

/// Restore the AVL balance of the subtree rooted at `v`, whose children are
/// balanced and hold correct heights and subtree maxes.
fn rebalance<R, V>(v: &mut Box<Node<R, V>>)
where
    R: Ord + Clone,
{
    update_height(v);

    // The child balance factor selects between the single and double
    // rotation. After an insert this matches comparing the new key against the
    // child key, and it remains correct when lower bounds are equal.
    match balance(v) {
        // Left-heavy
        (2..) if v.left().map(balance).unwrap_or_default() >= 0 => {
            rotate_right(v);
        }
        (2..) => {
            if let Some(l) = v.left_mut() {
                rotate_left(l);
            }
            rotate_right(v);
        }
        // Right-heavy
        (..=-2) if v.right().map(balance).unwrap_or_default() <= 0 => {
            rotate_left(v);
        }
        (..=-2) => {
            if let Some(r) = v.right_mut() {
                rotate_right(r);
            }
            rotate_left(v);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* balanced */ }
    }

    update_subtree_max(v);

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(v).abs() <= 1);
}

/// Detach the node holding the minimum lower bound in the subtree rooted at
/// `root`, returning the remaining subtree (if any) and the extracted node.
///
/// The right subtree of the extracted node is linked in its place.
fn extract_subtree_min<R, V>(mut root: Box<Node<R, V>>) -> (Option<Box<Node<R, V>>>, Box<Node<R, V>>)
where
    R: Ord + Clone,
{
    match root.take_left() {
        Some(left) => {
            // Descend left to the end of the left edge.
            let (rest, min) = extract_subtree_min(left);
            root.left = rest;
            rebalance(&mut root);
            (Some(root), min)
        }
        None => {
            // "root" is the minimum.
            //
            // ```text
            //                 6
            //                / \
            //    here ->   <4>   7
            //                \
            //                 5
            // ```
            //
            // Unlink the right node of "root", which takes its place.
            let rest = root.take_right();
            (rest, root)
        }
    }
}

/// Unlink the node `n` from the tree, returning the subtree that replaces it
/// (if any) and the extracted contents of `n`.
fn unlink<R, V>(mut n: Box<Node<R, V>>) -> (Option<Box<Node<R, V>>>, Extracted<R, V>)
where
    R: Ord + Clone,
{
    match (n.take_left(), n.take_right()) {
        // A leaf is simply dropped.
        (None, None) => (None, n.into_tuple()),

        // A single child replaces "n".
        (Some(child), None) | (None, Some(child)) => (Some(child), n.into_tuple()),

        (Some(left), Some(right)) => {
            // The in-order successor (the left-most node of the right subtree)
            // donates its interval and payload to "n", and the successor node
            // is detached instead.
            let (right, mut successor) = extract_subtree_min(right);

            std::mem::swap(&mut n.interval, &mut successor.interval);
            std::mem::swap(&mut n.payload, &mut successor.payload);

            n.left = Some(left);
            n.right = right;
            rebalance(&mut n);

            // "successor" now holds the contents removed from the tree.
            (Some(n), successor.into_tuple())
        }
    }
}

/// Remove a node whose interval has a lower bound equal to `low` from the
/// subtree rooted at `node`, rebalancing on the way back up.
///
/// If more than one interval shares `low`, the first node found on the search
/// path is removed.
///
/// Returns [`None`] if no interval has a lower bound of `low`.
pub(crate) fn remove_recurse<R, V>(
    node: &mut Option<Box<Node<R, V>>>,
    low: &R,
) -> Option<Extracted<R, V>>
where
    R: Ord + Clone,
{
    let n = node.as_mut()?;

    let removed = match low.cmp(n.interval.low()) {
        Ordering::Less => remove_recurse(&mut n.left, low)?,
        Ordering::Greater => remove_recurse(&mut n.right, low)?,
        Ordering::Equal => {
            let (replacement, removed) = unlink(node.take()?);
            *node = replacement;
            return Some(removed);
        }
    };

    rebalance(n);
    Some(removed)
}
