//! Branch generation by independent set partitioning.
//!
//! A clique holds at most one vertex of each independent set. So if the vertices of a graph can be
//! partitioned into independent sets whose summed max-weight fronts stay within a budget, no clique
//! of that graph can exceed the budget. Vertices that do not fit into such a partition are the
//! branching vertices: every clique that exceeds the budget contains at least one of them.

use crate::graph::{Graph, VertexId};
use crate::vertex_set::{VertexOrdering, VertexSet};
use crate::weight::{Weight, WeightFront};
use std::iter::once;

impl<'a> Graph<'a> {

    /// Returns the branching vertices for `budget`, sorted by `ordering`.
    ///
    /// Vertices are visited from the last to the first in `ordering`. Each vertex is put into the
    /// first independent set it fits in without exceeding `budget`, else into a new independent
    /// set if that stays within `budget`, else it becomes a branching vertex.
    pub fn get_branches(&self, budget: &Weight, ordering: &VertexOrdering) -> VertexSet {
        let mut candidates = self.vertex_set();
        candidates.order_with(ordering);

        let mut branches = VertexSet::new();
        let mut indiess: Vec<Vec<VertexId>> = Vec::new();
        // `fronts[i]` is the max-weight front of `indiess[i]`.
        let mut fronts: Vec<WeightFront> = Vec::new();

        'outer: for node in candidates.iter().rev() {
            let weight = self.weight(node);
            for i in 0..indiess.len() {
                if indiess[i].iter().any(|other| self.is_adjacent(node, *other)) {
                    continue
                }
                let mut extended = fronts[i].clone();
                extended.try_insert(weight.clone());
                let bound = WeightFront::sum(fronts.iter()
                    .enumerate()
                    .map(|(j, front)| if i == j { &extended } else { front }));
                if bound.within(budget) {
                    indiess[i].push(node);
                    fronts[i] = extended;
                    continue 'outer
                }
            }
            // If `node` does not fit in any independent set, try to open a new one.
            let single = WeightFront::from_weights(once(weight));
            if WeightFront::sum(fronts.iter().chain(once(&single))).within(budget) {
                indiess.push(vec![node]);
                fronts.push(single);
                continue 'outer
            }
            branches.push(node);
        }
        debug_assert_eq!(
            indiess.iter().map(|indies| indies.len()).sum::<usize>() + branches.len(),
            self.num_nodes()
        );
        branches.order_with(ordering);
        branches
    }
}
