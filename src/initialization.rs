//! Degeneracy based initialization of the clique search.
//!
//! Repeatedly removes a vertex of minimum degree to build an elimination ordering. As soon as the
//! remaining vertices induce a complete graph they are appended as a whole and form the initial
//! clique. Afterwards every vertex whose closed neighborhood cannot outweigh the lower bound is
//! removed from the graph, as it cannot be part of an improving clique.

use crate::clique::Clique;
use crate::graph::{Graph, VertexId};
use crate::vertex_set::{VertexOrdering, VertexSet};
use crate::weight::Weight;
use fxhash::{FxHashMap, FxHashSet};
use log::debug;
use std::collections::BTreeSet;

/// Result of `Graph::initialize`.
#[derive(Debug, Clone)]
pub struct Initialization<'a> {
    /// The complete remainder of the elimination.
    pub clique: Clique,
    /// Elimination ordering (minimum degree first).
    pub ordering: VertexOrdering,
    /// The graph without the vertices that cannot beat `lower_bound`.
    pub reduced: Graph<'a>,
    /// The lower bound used for the reduction.
    pub lower_bound: Weight,
}

impl<'a> Graph<'a> {

    /// Computes the degeneracy ordering, the initial clique and the reduced graph.
    /// `lower_bound` is replaced by the weight of the initial clique if that one dominates it.
    pub fn initialize(&self, lower_bound: &Weight) -> Initialization<'a> {
        let arena = self.arena();
        let mut ordering = VertexOrdering::new();
        let mut clique = Clique::empty(arena);

        // (degree, input id, node); the id breaks ties between equal degrees.
        let mut degrees: FxHashMap<VertexId, usize> = FxHashMap::default();
        degrees.reserve(self.num_nodes());
        let mut queue: BTreeSet<(usize, usize, VertexId)> = BTreeSet::new();
        for (node, degree) in self.compute_degrees() {
            degrees.insert(node, degree);
            queue.insert((degree, arena.id(node), node));
        }
        let mut removed: FxHashSet<VertexId> = FxHashSet::default();
        while let Some(&(degree, id, node)) = queue.iter().next() {
            if degree + 1 == queue.len() {
                // The remainder is a complete graph.
                let mut rest: Vec<(usize, VertexId)> = queue.iter().map(|(_, id, node)| (*id, *node)).collect();
                rest.sort_unstable();
                let members: VertexSet = rest.into_iter().map(|(_, node)| node).collect();
                for node in members.iter() {
                    ordering.push(node);
                }
                clique = Clique::from_set(members, arena);
                break
            }
            queue.remove(&(degree, id, node));
            removed.insert(node);
            ordering.push(node);
            for neighbor in self.neighbors(node).expect("`node` is in `self`") {
                if removed.contains(neighbor) {
                    continue
                }
                if let Some(degree) = degrees.get_mut(neighbor) {
                    let id = arena.id(*neighbor);
                    queue.remove(&(*degree, id, *neighbor));
                    *degree -= 1;
                    queue.insert((*degree, id, *neighbor));
                }
            }
        }

        let lower_bound = if lower_bound.dominated_by(clique.weight()) {
            clique.weight().clone()
        } else {
            lower_bound.clone()
        };

        let hopeless: FxHashSet<VertexId> = self.nodes().iter()
            .copied()
            .filter(|node| {
                let mut closed = self.neighborhood_weight(*node);
                closed += self.weight(*node);
                closed.dominated_by(&lower_bound)
            })
            .collect();
        let mut reduced = self.clone();
        reduced.remove_vertices(&hopeless);
        debug!(
            "initialize: n={}, initial clique of size {} with weight {}, removed {} vertices",
            self.num_nodes(),
            clique.len(),
            clique.weight(),
            hopeless.len()
        );
        Initialization {
            clique,
            ordering,
            reduced,
            lower_bound,
        }
    }
}

impl Initialization<'_> {

    /// Returns the nodes of the reduced graph, sorted by the elimination ordering.
    pub fn ordered_nodes(&self) -> VertexSet {
        let mut nodes = self.reduced.vertex_set();
        nodes.order_with(&self.ordering);
        nodes
    }

    /// Returns the neighbors of `node` in the reduced graph that come after `node` in the
    /// elimination ordering, sorted by that ordering.
    pub fn later_neighbors(&self, node: VertexId) -> VertexSet {
        let position = match self.ordering.position(node) {
            Some(position) => position,
            None => return VertexSet::new(),
        };
        let mut later: VertexSet = match self.reduced.neighbors(node) {
            Some(neighbors) => neighbors.iter()
                .copied()
                .filter(|other| self.ordering.position(*other).map_or(false, |p| p > position))
                .collect(),
            None => VertexSet::new(),
        };
        later.order_with(&self.ordering);
        later
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexArena;
    use std::io::Cursor;

    #[test]
    fn complete_graph_test() {
        let arena = VertexArena::read_wgr(Cursor::new(
            "i 5 w 1\n1\n1\n1\n1\n1\n1 2\n1 3\n1 4\n1 5\n2 3\n2 4\n2 5\n3 4\n3 5\n4 5\n"
        )).unwrap();
        let graph = arena.graph();
        let init = graph.initialize(&Weight::zero(1));
        assert_eq!(init.clique.len(), 5);
        assert_eq!(init.clique.weight(), &Weight::from(vec![5]));
        assert_eq!(init.ordering.as_slice(), &[0, 1, 2, 3, 4]);
        assert_eq!(init.lower_bound, Weight::from(vec![5]));
        // every closed neighborhood weighs exactly the bound
        assert!(init.reduced.is_empty());
    }

    #[test]
    fn degeneracy_ordering_test() {
        // triangle 1-2-3 with a pendant path 3-4-5
        let arena = VertexArena::read_wgr(Cursor::new(
            "i 5 w 1\n1\n1\n1\n1\n1\n1 2\n2 3\n1 3\n3 4\n4 5\n"
        )).unwrap();
        let graph = arena.graph();
        let init = graph.initialize(&Weight::zero(1));
        // 5 (deg 1), then 4 (deg 1 after removing 5), then the triangle by id
        assert_eq!(init.ordering.as_slice(), &[4, 3, 0, 1, 2]);
        assert_eq!(init.clique.members().sorted_ids(&arena), vec![1, 2, 3]);
        // 4 and 5 have closed neighborhoods of weight <= 3; the triangle members 1 and 2 as well
        assert_eq!(init.reduced.nodes(), &[2]);
    }

    #[test]
    fn reduction_respects_lower_bound_test() {
        let arena = VertexArena::read_wgr(Cursor::new(
            "i 4 w 2\n10 1\n10 1\n1 10\n1 15\n3 1\n3 2\n3 4\n1 2\n"
        )).unwrap();
        let graph = arena.graph();
        let init = graph.initialize(&Weight::zero(2));
        assert!(graph.is_clique(init.clique.members()));
        // nothing can be removed with an incomparable bound
        let init = graph.initialize(&Weight::from(vec![0, 100]));
        assert_eq!(init.reduced.num_nodes(), 4);
        // 1, 2 and 4 are removed by {21, 30}
        let init = graph.initialize(&Weight::from(vec![21, 30]));
        assert_eq!(init.reduced.nodes(), &[2]);
        assert_eq!(init.lower_bound, Weight::from(vec![21, 30]));
    }

    #[test]
    fn later_neighbors_test() {
        let arena = VertexArena::read_wgr(Cursor::new(
            "i 6 w 2\n5 1\n1 5\n5 1\n1 5\n5 1\n1 5\n1 2\n2 3\n3 4\n4 5\n5 6\n6 1\n1 4\n"
        )).unwrap();
        let graph = arena.graph();
        let init = graph.initialize(&Weight::zero(2));
        // the initial clique is an edge of weight {6,6}, no closed neighborhood is that light
        let ordered = init.ordered_nodes();
        assert_eq!(ordered.len(), 6);
        for (j, node) in ordered.iter().enumerate() {
            let suffix = ordered.sub_set(j + 1, ordered.len() - 1);
            assert_eq!(init.later_neighbors(node), init.reduced.neighbors_in(node, &suffix));
        }
        // a vertex outside of the ordering has no later neighbors
        assert!(init.later_neighbors(arena.num_vertices()).is_empty());
    }

    #[test]
    fn empty_graph_test() {
        let arena = VertexArena::new(2);
        let init = arena.graph().initialize(&Weight::zero(2));
        assert!(init.clique.is_empty());
        assert!(init.ordering.is_empty());
        assert!(init.reduced.is_empty());
    }

}
