//! Implementation of the branch and bound search for the Pareto front of maximum weight cliques.

use crate::clique::{Clique, Cliques};
use crate::graph::Graph;
use crate::mwc_instance::MwcInstance;
use crate::vertex_set::VertexOrdering;
use crate::weight::Weight;
use log::{info, trace, warn};
use std::time::Instant;

impl<'a> MwcInstance<'a> {

    /// Computes the Pareto front of the maximum weight cliques of `self.graph`.
    ///
    /// 1. Initializes the search with a zero lower bound. The complete remainder of the
    ///    elimination is the first incumbent.
    /// 2. Visits the vertices of the reduced graph from the last to the first in the elimination
    ///    ordering. Each vertex `v` is combined with its neighbors later in the ordering only, so
    ///    each clique is considered exactly once (rooted at its earliest member).
    /// 3. Skips `v` if the weight of `v` and its later neighbors is dominated by an incumbent.
    /// 4. Initializes the neighborhood of `v` with the weight of the first incumbent minus the
    ///    weight of `v` as lower bound. The complete remainder of that elimination together with
    ///    `v` is a clique and becomes an incumbent unless the first incumbent dominates it.
    /// 5. Runs `search_max_w_cliques()` on the reduced neighborhood and merges the result into
    ///    `self.current_best`.
    ///
    /// If the stop token trips, the front found so far is returned.
    pub fn wlmc(&mut self) -> Cliques {
        let start = Instant::now();
        self.nodes_explored = 0;
        let graph = self.graph.clone();
        let arena = graph.arena();

        let init = graph.initialize(&Weight::zero(arena.dimension()));
        self.current_best = Cliques::from(init.clique.clone());
        let ordered = init.ordered_nodes();
        let reduced = &init.reduced;
        info!(
            "Initial clique weighs {}, {} of {} vertices remain",
            init.clique.weight(),
            reduced.num_nodes(),
            graph.num_nodes()
        );

        for j in (0..ordered.len()).rev() {
            if self.stop_token().is_stopped() {
                warn!("Search stopped with {} of {} vertices left", j + 1, ordered.len());
                break
            }
            let node = ordered[j];
            let candidates = init.later_neighbors(node);
            let mut potential = candidates.weight(arena);
            potential += arena.weight(node);
            if self.current_best.dominates(&potential) {
                trace!("skip vertex {}: potential {} is dominated", arena.id(node), potential);
                continue
            }

            let reference = match self.current_best.first() {
                Some(clique) => clique.clone(),
                None => Clique::empty(arena),
            };
            let neighborhood = reduced.induced_subgraph(&candidates);
            let sub = neighborhood.initialize(&(reference.weight() - arena.weight(node)));
            let candidate = sub.clique.with_vertex(node, arena);
            let cmax = if candidate.weight().dominated_by(reference.weight()) {
                reference
            } else {
                self.update_current_best(candidate.clone());
                candidate
            };
            trace!(
                "vertex {}: {} candidates, {} after reduction",
                arena.id(node),
                candidates.len(),
                sub.reduced.num_nodes()
            );

            let root = Clique::single(node, arena);
            let found = self.search_max_w_cliques(&sub.reduced, &cmax, &root, &sub.ordering);
            for clique in found {
                self.update_current_best(clique);
            }
        }

        self.current_best.sort_by_ids(arena);
        info!(
            "Search finished after {:.3}s: {} clique(s) in the front, {} search nodes explored",
            start.elapsed().as_secs_f64(),
            self.current_best.len(),
            self.nodes_explored
        );
        self.current_best.clone()
    }

    /// Runs `wlmc()` and returns its single champion, or `None` if the front holds several
    /// incomparable cliques. With one weight dimension there always is a champion.
    pub fn wlmc_single(&mut self) -> Option<Clique> {
        let front = self.wlmc();
        if front.len() != 1 {
            return None
        }
        front.into_iter().next()
    }

    /// Returns the front of cliques `clique ∪ K` for the cliques `K` of `graph` that are not
    /// dominated by `cmax`, seeded with `cmax` itself.
    ///
    /// The branching vertices `B` of `graph` for the budget `w(cmax) - w(clique)` are computed
    /// first, every clique of `graph` that avoids `B` stays within the budget. Then, from the last
    /// branching vertex to the first, `b` is added to `clique` and the search recurses into the
    /// neighbors of `b` among the non-branching vertices and the branching vertices after `b`.
    /// A branch is pruned if its weight bound is dominated by `cmax`. A found clique that dominates
    /// `cmax` replaces it for the remaining branches.
    pub fn search_max_w_cliques(
        &mut self,
        graph: &Graph<'a>,
        cmax: &Clique,
        clique: &Clique,
        ordering: &VertexOrdering,
    ) -> Cliques {
        self.nodes_explored += 1;
        if graph.is_empty() {
            return Cliques::from(clique.clone())
        }
        if self.stop_token().is_stopped() {
            return Cliques::from(cmax.clone())
        }
        let arena = graph.arena();
        let branches = graph.get_branches(&(cmax.weight() - clique.weight()), ordering);
        if branches.is_empty() {
            return Cliques::from(cmax.clone())
        }

        let mut rest = graph.vertex_set();
        rest.remove(&branches);
        rest.order_with(ordering);

        let mut front = Cliques::from(cmax.clone());
        let mut cmax = cmax.clone();
        for i in (0..branches.len()).rev() {
            let node = branches[i];
            let pool = rest.union(&branches.sub_set(i + 1, branches.len() - 1));
            let candidates = graph.neighbors_in(node, &pool);
            let extended = clique.with_vertex(node, arena);
            let mut bound = candidates.weight(arena);
            bound += extended.weight();
            if bound.dominated_by(cmax.weight()) {
                continue
            }
            let sub = graph.induced_subgraph(&candidates);
            for found in self.search_max_w_cliques(&sub, &cmax, &extended, ordering) {
                if cmax.weight().dominated_by(found.weight()) {
                    cmax = found.clone();
                }
                front.try_insert(found);
            }
        }
        front
    }
}

#[cfg(test)]
mod tests {
    use crate::clique::{Clique, Cliques};
    use crate::config::SolverConfig;
    use crate::generator::{generate_weighted, GeneratorParams};
    use crate::graph::VertexArena;
    use crate::mwc_instance::MwcInstance;
    use crate::stop::StopToken;
    use crate::vertex_set::VertexSet;
    use crate::weight::{Weight, WeightFront};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use std::io::Cursor;

    fn solve(arena: &VertexArena) -> Cliques {
        let config = SolverConfig::with_dimension(arena.dimension());
        let mut ins = MwcInstance::new(arena.graph(), config).unwrap();
        let front = ins.wlmc();
        assert!(ins.validate_solution(&front).is_ok());
        front
    }

    /// Enumerates every vertex subset and keeps the Pareto front of the clique weights.
    fn brute_force(arena: &VertexArena) -> WeightFront {
        let graph = arena.graph();
        let n = arena.num_vertices();
        let mut front = WeightFront::new();
        for mask in 0u32..(1 << n) {
            let set: VertexSet = (0..n).filter(|i| mask & (1 << i) != 0).collect();
            if graph.is_clique(&set) {
                front.try_insert(set.weight(arena));
            }
        }
        front
    }

    fn sorted_weights(front: &WeightFront) -> Vec<Vec<i64>> {
        let mut weights: Vec<Vec<i64>> = front.iter().map(|w| w.values().to_vec()).collect();
        weights.sort();
        weights
    }

    #[test]
    fn complete_graph_test() {
        let arena = VertexArena::read_wgr(Cursor::new(
            "i 5 w 1\n1\n1\n1\n1\n1\n1 2\n1 3\n1 4\n1 5\n2 3\n2 4\n2 5\n3 4\n3 5\n4 5\n"
        )).unwrap();
        let front = solve(&arena);
        assert_eq!(front.len(), 1);
        let best = front.first().unwrap();
        assert_eq!(best.members().sorted_ids(&arena), vec![1, 2, 3, 4, 5]);
        assert_eq!(best.weight(), &Weight::from(vec![5]));
    }

    #[test]
    fn two_objectives_test() {
        let arena = VertexArena::read_wgr(Cursor::new(
            "i 4 w 2\n10 1\n10 1\n1 10\n1 15\n1 2\n3 4\n"
        )).unwrap();
        let front = solve(&arena);
        assert_eq!(
            format!("{}", front.display(&arena)),
            "{ 1 2 }   weight: {20 2}\n{ 3 4 }   weight: {2 25}"
        );
    }

    #[test]
    fn triangle_dominates_edge_test() {
        // with the edges (3,1) and (3,2) the triangle {1,2,3} dominates {1,2}
        let arena = VertexArena::read_wgr(Cursor::new(
            "i 4 w 2\n10 1\n10 1\n1 10\n1 15\n3 1\n3 2\n3 4\n1 2\n"
        )).unwrap();
        let front = solve(&arena);
        assert_eq!(
            format!("{}", front.display(&arena)),
            "{ 1 2 3 }   weight: {21 12}\n{ 3 4 }   weight: {2 25}"
        );
    }

    #[test]
    fn duplicate_edges_test() {
        let arena = VertexArena::read_wgr(Cursor::new("i 3 w 1\n4\n5\n7\n1 2\n2 1\n2 3\n")).unwrap();
        assert_eq!(arena.num_edges(), 2);
        let mut ins = MwcInstance::new(arena.graph(), SolverConfig::default()).unwrap();
        let best = ins.wlmc_single().unwrap();
        assert_eq!(best.members().sorted_ids(&arena), vec![2, 3]);
        assert_eq!(best.weight(), &Weight::from(vec![12]));
    }

    #[test]
    fn disconnected_components_test() {
        // triangle 1-2-3 and the edge 4-5
        let both = "i 5 w 2\n2 1\n2 1\n2 1\n4 0\n0 4\n1 2\n2 3\n1 3\n4 5\n";
        let triangle = "i 3 w 2\n2 1\n2 1\n2 1\n1 2\n2 3\n1 3\n";
        let edge = "i 2 w 2\n4 0\n0 4\n1 2\n";
        let both = VertexArena::read_wgr(Cursor::new(both)).unwrap();
        let mut expected = WeightFront::new();
        for part in [triangle, edge] {
            let arena = VertexArena::read_wgr(Cursor::new(part)).unwrap();
            for clique in solve(&arena).iter() {
                expected.try_insert(clique.weight().clone());
            }
        }
        assert_eq!(sorted_weights(&solve(&both).weights()), sorted_weights(&expected));
        assert_eq!(sorted_weights(&expected), vec![vec![4, 4], vec![6, 3]]);
    }

    #[test]
    fn empty_graph_test() {
        let arena = VertexArena::new(3);
        let front = solve(&arena);
        assert_eq!(front.len(), 1);
        assert!(front.first().unwrap().is_empty());
        assert_eq!(front.first().unwrap().weight(), &Weight::zero(3));
    }

    #[test]
    fn single_dimension_brute_force_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        for round in 0..30 {
            let params = GeneratorParams { nodes: 6 + round % 10, edges: 10 + 2 * round, dimension: 1, max_weight: 20 };
            let arena = generate_weighted(&mut rng, &params).unwrap();
            let mut ins = MwcInstance::new(arena.graph(), SolverConfig::default()).unwrap();
            let best = ins.wlmc_single().unwrap();
            assert!(arena.graph().is_clique(best.members()));
            assert_eq!(sorted_weights(&brute_force(&arena)), vec![best.weight().values().to_vec()]);
        }
    }

    #[test]
    fn multi_dimension_brute_force_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        for round in 0..30 {
            let params = GeneratorParams {
                nodes: 5 + round % 9,
                edges: 8 + 2 * round,
                dimension: 2 + round % 2,
                max_weight: 10,
            };
            let arena = generate_weighted(&mut rng, &params).unwrap();
            let front = solve(&arena);
            assert_eq!(sorted_weights(&front.weights()), sorted_weights(&brute_force(&arena)));
        }
    }

    #[test]
    fn edge_removal_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(13);
        for _ in 0..10 {
            let params = GeneratorParams { nodes: 10, edges: 25, dimension: 1, max_weight: 15 };
            let arena = generate_weighted(&mut rng, &params).unwrap();
            let full = solve(&arena);
            // rebuild without the first edge
            let mut thinned = VertexArena::new(1);
            for node in 0..arena.num_vertices() {
                thinned.add_vertex(arena.id(node), arena.weight(node).clone());
            }
            for (a, b) in arena.edges().iter().skip(1) {
                thinned.connect(*a, *b);
            }
            let thin = solve(&thinned);
            let full_weight = full.first().unwrap().weight();
            let thin_weight = thin.first().unwrap().weight();
            assert!(thin_weight.dominated_by(full_weight));
        }
    }

    #[test]
    fn isolated_zero_vertex_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(17);
        for _ in 0..10 {
            let params = GeneratorParams { nodes: 9, edges: 20, dimension: 2, max_weight: 6 };
            let arena = generate_weighted(&mut rng, &params).unwrap();
            let mut padded = arena.clone();
            padded.add_vertex(arena.num_vertices() + 1, Weight::zero(2));
            assert_eq!(sorted_weights(&solve(&arena).weights()), sorted_weights(&solve(&padded).weights()));
        }
    }

    #[test]
    fn stopped_search_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(23);
        let params = GeneratorParams { nodes: 40, edges: 300, dimension: 2, max_weight: 50 };
        let arena = generate_weighted(&mut rng, &params).unwrap();
        let stop = StopToken::new();
        stop.stop();
        let mut ins = MwcInstance::new(arena.graph(), SolverConfig::with_dimension(2))
            .unwrap()
            .with_stop_token(stop);
        let front = ins.wlmc();
        // only the initial clique
        assert_eq!(front.len(), 1);
        assert!(ins.validate_solution(&front).is_ok());
    }

    /// Returns a generated arena whose initialization keeps at least two vertices.
    fn unreduced_arena(rng: &mut Pcg64Mcg) -> VertexArena {
        let params = GeneratorParams { nodes: 30, edges: 150, dimension: 2, max_weight: 40 };
        loop {
            let arena = generate_weighted(rng, &params).unwrap();
            if arena.graph().initialize(&Weight::zero(2)).reduced.num_nodes() > 1 {
                return arena
            }
        }
    }

    #[test]
    fn stop_inside_recursion_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(29);
        let arena = unreduced_arena(&mut rng);
        let graph = arena.graph();
        let init = graph.initialize(&Weight::zero(2));
        let empty = Clique::empty(&arena);

        let mut ins = MwcInstance::new(arena.graph(), SolverConfig::with_dimension(2)).unwrap();
        let full = ins.search_max_w_cliques(&init.reduced, &empty, &empty, &init.ordering);
        assert!(ins.nodes_explored() > 1);
        assert!(ins.validate_solution(&full).is_ok());
        assert!(full.iter().all(|clique| !clique.is_empty()));

        // the root call passes the check, every recursive call stops
        let mut ins = MwcInstance::new(arena.graph(), SolverConfig::with_dimension(2))
            .unwrap()
            .with_stop_token(StopToken::new().with_check_limit(1));
        let cut = ins.search_max_w_cliques(&init.reduced, &empty, &empty, &init.ordering);
        assert!(ins.nodes_explored() > 1);
        assert!(ins.validate_solution(&cut).is_ok());
        assert!(cut.iter().all(|clique| full.dominates(clique.weight())));

        let stop = StopToken::new();
        stop.stop();
        let mut ins = MwcInstance::new(arena.graph(), SolverConfig::with_dimension(2))
            .unwrap()
            .with_stop_token(stop);
        let stopped = ins.search_max_w_cliques(&init.reduced, &empty, &empty, &init.ordering);
        assert_eq!(ins.nodes_explored(), 1);
        assert_eq!(stopped, Cliques::from(empty));
    }

    #[test]
    fn node_limit_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(31);
        let arena = unreduced_arena(&mut rng);
        let mut ins = MwcInstance::new(arena.graph(), SolverConfig::with_dimension(2)).unwrap();
        let full = ins.wlmc();
        // every driver step and search node checks the token at most once
        let checks = ins.nodes_explored() + arena.num_vertices();
        let step = (checks / 40).max(1);
        for limit in (0..=checks).step_by(step) {
            let config = SolverConfig { node_limit: Some(limit), ..SolverConfig::with_dimension(2) };
            let mut limited = MwcInstance::new(arena.graph(), config).unwrap();
            let front = limited.wlmc();
            assert!(!front.is_empty());
            assert!(limited.validate_solution(&front).is_ok());
            assert!(front.iter().all(|clique| full.dominates(clique.weight())));
        }
        let config = SolverConfig { node_limit: Some(checks), ..SolverConfig::with_dimension(2) };
        let mut unlimited = MwcInstance::new(arena.graph(), config).unwrap();
        assert_eq!(sorted_weights(&unlimited.wlmc().weights()), sorted_weights(&full.weights()));
    }

}
