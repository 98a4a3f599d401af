//! Random weighted graphs with a fixed number of distinct edges.

use crate::cust_error::ProcessingError;
use crate::graph::{VertexArena, VertexId};
use crate::weight::Weight;
use fxhash::FxHashSet;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

/// Parameters of `generate_weighted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    pub nodes: usize,
    pub edges: usize,
    pub dimension: usize,
    /// Every weight is drawn uniformly from `1..=max_weight`.
    pub max_weight: i64,
}

/// Samples a graph with `params.nodes` vertices and `params.edges` distinct edges chosen uniformly
/// at random. If more edges are requested than there are vertex pairs, the complete graph is
/// returned.
pub fn generate_weighted<R: Rng>(rng: &mut R, params: &GeneratorParams) -> Result<VertexArena, ProcessingError> {
    if params.dimension == 0 {
        return Err(ProcessingError::InvalidParameter("`dimension` has to be at least 1".to_owned()))
    }
    if params.max_weight < 1 {
        return Err(ProcessingError::InvalidParameter("`max_weight` has to be at least 1".to_owned()))
    }
    let fits = i64::try_from(params.nodes).ok()
        .and_then(|n| n.checked_mul(params.max_weight))
        .is_some();
    if !fits {
        return Err(ProcessingError::InvalidParameter("`nodes` * `max_weight` exceeds i64::MAX".to_owned()))
    }
    let n = params.nodes;
    let pairs = n * n.saturating_sub(1) / 2;
    let m = if params.edges > pairs {
        info!("Requested {} edges, but {} vertices only allow {}", params.edges, n, pairs);
        pairs
    } else {
        params.edges
    };

    let mut arena = VertexArena::new(params.dimension);
    for id in 1..=n {
        let values: Vec<i64> = (0..params.dimension)
            .map(|_| rng.gen_range(1..=params.max_weight))
            .collect();
        arena.add_vertex(id, Weight::from(values));
    }

    if 2 * m <= pairs {
        // Sparse: rejection sampling terminates quickly.
        let mut chosen: FxHashSet<(VertexId, VertexId)> = FxHashSet::default();
        while chosen.len() < m {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            if a == b {
                continue
            }
            let edge = (a.min(b), a.max(b));
            if chosen.insert(edge) {
                arena.connect(edge.0, edge.1);
            }
        }
    } else {
        let mut all: Vec<(VertexId, VertexId)> = Vec::with_capacity(pairs);
        for a in 0..n {
            for b in a+1..n {
                all.push((a, b));
            }
        }
        all.shuffle(rng);
        for (a, b) in all.into_iter().take(m) {
            arena.connect(a, b);
        }
    }
    Ok(arena)
}
