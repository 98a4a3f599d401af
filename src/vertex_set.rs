//! Ordered collections of vertices of a `VertexArena` and the orderings used to sort them.

use crate::graph::{VertexArena, VertexId};
use crate::weight::Weight;
use fxhash::{FxHashMap, FxHashSet};
use std::ops::Index;

/// An ordered collection of vertex indices. Set operations compare vertices by their index.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct VertexSet {
    vertices: Vec<VertexId>,
}

impl VertexSet {

    pub fn new() -> Self {
        VertexSet { vertices: Vec::new() }
    }

    pub fn push(&mut self, node: VertexId) {
        self.vertices.push(node);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, node: VertexId) -> bool {
        self.vertices.contains(&node)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item=VertexId> + ExactSizeIterator + '_ {
        self.vertices.iter().copied()
    }

    pub fn as_slice(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Returns `self` with `node` appended, unless it is already contained.
    pub fn with(&self, node: VertexId) -> VertexSet {
        let mut union = self.clone();
        if !union.contains(node) {
            union.push(node);
        }
        union
    }

    /// Returns all nodes of `self` followed by the nodes of `other` that are not in `self`.
    pub fn union(&self, other: &VertexSet) -> VertexSet {
        let present: FxHashSet<VertexId> = self.vertices.iter().copied().collect();
        let mut union = self.clone();
        union.vertices.extend(other.vertices.iter().filter(|node| !present.contains(node)));
        union
    }

    /// Returns the nodes of `self` that are also in `other`, in the order of `self`.
    pub fn intersection(&self, other: &VertexSet) -> VertexSet {
        let present: FxHashSet<VertexId> = other.vertices.iter().copied().collect();
        self.vertices.iter()
            .copied()
            .filter(|node| present.contains(node))
            .collect()
    }

    /// Removes all nodes of `other` from `self`. The last node takes the place of a removed one,
    /// so the order is not preserved.
    pub fn remove(&mut self, other: &VertexSet) {
        for node in other.iter() {
            if let Some(pos) = self.vertices.iter().position(|v| *v == node) {
                self.vertices.swap_remove(pos);
            }
        }
    }

    /// Returns the nodes at the positions `begin..=end`, or an empty set if `begin > end`.
    pub fn sub_set(&self, begin: usize, end: usize) -> VertexSet {
        if begin > end || begin >= self.vertices.len() {
            return VertexSet::new()
        }
        let end = end.min(self.vertices.len() - 1);
        self.vertices[begin..=end].iter().copied().collect()
    }

    /// Stably sorts `self` by the positions in `ordering`. Nodes that do not appear in `ordering`
    /// keep their relative order at the end.
    pub fn order_with(&mut self, ordering: &VertexOrdering) {
        self.vertices.sort_by_key(|node| ordering.position(*node).unwrap_or(usize::MAX));
    }

    /// Returns the component-wise sum of the weights of all nodes.
    pub fn weight(&self, arena: &VertexArena) -> Weight {
        let mut total = Weight::zero(arena.dimension());
        for node in self.iter() {
            total += arena.weight(node);
        }
        total
    }

    /// Returns the input ids of all nodes in ascending order.
    pub fn sorted_ids(&self, arena: &VertexArena) -> Vec<usize> {
        let mut ids: Vec<usize> = self.iter().map(|node| arena.id(node)).collect();
        ids.sort_unstable();
        ids
    }
}

impl From<Vec<VertexId>> for VertexSet {
    fn from(vertices: Vec<VertexId>) -> Self {
        VertexSet { vertices }
    }
}

impl FromIterator<VertexId> for VertexSet {
    fn from_iter<I: IntoIterator<Item=VertexId>>(iter: I) -> Self {
        VertexSet { vertices: iter.into_iter().collect() }
    }
}

impl Index<usize> for VertexSet {
    type Output = VertexId;

    fn index(&self, pos: usize) -> &VertexId {
        &self.vertices[pos]
    }
}

/// A fixed sequence of vertices with constant time position lookup.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct VertexOrdering {
    order: Vec<VertexId>,
    position: FxHashMap<VertexId, usize>,
}

impl VertexOrdering {

    pub fn new() -> Self {
        VertexOrdering::default()
    }

    /// Appends `node`. Nodes already in the ordering are ignored.
    pub fn push(&mut self, node: VertexId) {
        if !self.position.contains_key(&node) {
            self.position.insert(node, self.order.len());
            self.order.push(node);
        }
    }

    pub fn position(&self, node: VertexId) -> Option<usize> {
        self.position.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[VertexId] {
        &self.order
    }
}

impl FromIterator<VertexId> for VertexOrdering {
    fn from_iter<I: IntoIterator<Item=VertexId>>(iter: I) -> Self {
        let mut ordering = VertexOrdering::new();
        for node in iter {
            ordering.push(node);
        }
        ordering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_algebra_test() {
        let a = VertexSet::from(vec![4, 1, 3]);
        let b = VertexSet::from(vec![3, 5, 4]);
        assert_eq!(a.union(&b), VertexSet::from(vec![4, 1, 3, 5]));
        assert_eq!(a.intersection(&b), VertexSet::from(vec![4, 3]));
        assert_eq!(a.with(1), a);
        assert_eq!(a.with(7), VertexSet::from(vec![4, 1, 3, 7]));
        let mut c = VertexSet::from(vec![0, 1, 2, 3, 4]);
        c.remove(&VertexSet::from(vec![1, 9]));
        assert_eq!(c, VertexSet::from(vec![0, 4, 2, 3]));
    }

    #[test]
    fn sub_set_test() {
        let a = VertexSet::from(vec![7, 8, 9]);
        assert_eq!(a.sub_set(1, 2), VertexSet::from(vec![8, 9]));
        assert_eq!(a.sub_set(0, 0), VertexSet::from(vec![7]));
        assert!(a.sub_set(3, 2).is_empty());
        assert!(a.sub_set(2, 1).is_empty());
    }

    #[test]
    fn order_with_test() {
        let ordering: VertexOrdering = vec![5, 3, 1, 0].into_iter().collect();
        let mut a = VertexSet::from(vec![0, 7, 1, 6, 5]);
        a.order_with(&ordering);
        assert_eq!(a, VertexSet::from(vec![5, 1, 0, 7, 6]));
        assert_eq!(ordering.position(1), Some(2));
        assert_eq!(ordering.position(2), None);
    }

}
