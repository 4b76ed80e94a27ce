use crate::node::Node;

use super::pruning_iter::PruningOracle;

/// Matches intervals sharing at least one point with `[low, high]`.
///
/// A subtree whose max upper bound is below `low` holds no match, and neither
/// does any node (or its right subtree) with a lower bound above `high`.
#[derive(Debug)]
pub(crate) struct OverlapsPruner<'a, R> {
    pub(crate) low: &'a R,
    pub(crate) high: &'a R,
}

impl<R, V> PruningOracle<R, V> for OverlapsPruner<'_, R>
where
    R: Ord,
{
    fn visit_subtree(&self, subtree_root: &Node<R, V>) -> bool {
        subtree_root.subtree_max() >= self.low
    }

    fn visit_right(&self, n: &Node<R, V>) -> bool {
        n.interval().low() <= self.high
    }

    fn filter_yield(&self, n: &Node<R, V>) -> bool {
        n.interval().overlaps(self.low, self.high)
    }
}

/// Matches intervals containing `point`.
#[derive(Debug)]
pub(crate) struct ContainsPruner<'a, R> {
    pub(crate) point: &'a R,
}

impl<R, V> PruningOracle<R, V> for ContainsPruner<'_, R>
where
    R: Ord,
{
    fn visit_subtree(&self, subtree_root: &Node<R, V>) -> bool {
        subtree_root.subtree_max() >= self.point
    }

    fn visit_right(&self, n: &Node<R, V>) -> bool {
        n.interval().low() <= self.point
    }

    fn filter_yield(&self, n: &Node<R, V>) -> bool {
        n.interval().contains_point(self.point)
    }
}

/// Visits and yields every node, producing a plain in-order walk.
#[derive(Debug)]
pub(crate) struct Unpruned;

impl<R, V> PruningOracle<R, V> for Unpruned {
    fn visit_subtree(&self, _subtree_root: &Node<R, V>) -> bool {
        true
    }

    fn visit_right(&self, _n: &Node<R, V>) -> bool {
        true
    }

    fn filter_yield(&self, _n: &Node<R, V>) -> bool {
        true
    }
}
