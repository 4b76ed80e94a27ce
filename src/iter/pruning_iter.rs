use crate::node::Node;

/// Decides which parts of a tree a [`PruningIter`] visits and yields.
pub(crate) trait PruningOracle<R, V> {
    /// Returns true when the subtree rooted at `subtree_root` may contain a
    /// match and should be descended into.
    fn visit_subtree(&self, subtree_root: &Node<R, V>) -> bool;

    /// Returns true when the node `n` and its right subtree should be
    /// evaluated.
    fn visit_right(&self, n: &Node<R, V>) -> bool;

    /// Returns true if `n` satisfies the pruning logic and should be yielded to
    /// the caller.
    fn filter_yield(&self, n: &Node<R, V>) -> bool;
}

/// An [`Iterator`] that performs a depth-first, in-order walk of a subtree and
/// yields [`Node`] instances that match a pruning predicate.
///
/// The walk uses an explicit stack, so the traversal depth is not bounded by
/// the call stack.
#[derive(Debug)]
pub(crate) struct PruningIter<'a, R, V, T> {
    stack: Vec<&'a Node<R, V>>,
    pruner: T,
}

impl<'a, R, V, T> PruningIter<'a, R, V, T>
where
    T: PruningOracle<R, V>,
{
    pub(crate) fn new(root: Option<&'a Node<R, V>>, pruner: T) -> Self {
        let mut this = Self {
            stack: vec![],
            pruner,
        };

        // Descend down the left side of the tree, pushing all the internal
        // nodes onto the stack until the left-most leaf is reached.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<R, V>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            if !self.pruner.visit_subtree(v) {
                // Prune this subtree rooted at "v" (and therefore its left
                // subtree) from the search.
                break;
            }

            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, R, V, T> Iterator for PruningIter<'a, R, V, T>
where
    T: PruningOracle<R, V>,
{
    type Item = &'a Node<R, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.stack.pop()?;

            if !self.pruner.visit_right(v) {
                // Prune this node and the right subtree from the search.
                continue;
            }

            // Push the right subtree to be visited next.
            if let Some(right) = v.right() {
                self.push_subtree(right);
            }

            // Yield this node if it satisfies the pruning predicate.
            if self.pruner.filter_yield(v) {
                return Some(v);
            }
        }
    }
}
