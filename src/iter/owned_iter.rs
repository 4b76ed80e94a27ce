use std::sync::Arc;

use crate::{interval::Interval, node::Node};

/// An iterator of owned `(interval, payload)` tuples in ascending lower bound
/// order, returned by the [`IntoIterator`] impl of [`IntervalTree`].
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug)]
pub struct IntoIter<R, V> {
    stack: Vec<Box<Node<R, V>>>,
}

impl<R, V> IntoIter<R, V> {
    pub(crate) fn new(root: Option<Box<Node<R, V>>>) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: Box<Node<R, V>>) {
        let mut ptr = Some(subtree_root);

        while let Some(mut v) = ptr {
            ptr = v.take_left();
            self.stack.push(v);
        }
    }
}

impl<R, V> Iterator for IntoIter<R, V> {
    type Item = (Interval<R>, Option<Arc<V>>);

    fn next(&mut self) -> Option<Self::Item> {
        let mut v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.take_right() {
            self.push_subtree(right);
        }

        Some(v.into_tuple())
    }
}
