//! The solver state shared by the search, with validation and output of the found cliques.

use crate::clique::{Clique, Cliques};
use crate::config::SolverConfig;
use crate::cust_error::ProcessingError;
use crate::graph::{Graph, VertexArena};
use crate::stop::StopToken;
use log::debug;
use std::io::{self, Write};

/// A maximum weight clique instance: the input graph, the front of the best cliques found so far
/// and the token that stops the search.
#[derive(Debug, Clone)]
pub struct MwcInstance<'a> {
    pub graph: Graph<'a>,
    pub current_best: Cliques,
    stop: StopToken,
    /// Number of recursive search calls of the last run.
    pub(crate) nodes_explored: usize,
}

impl<'a> MwcInstance<'a> {

    /// Builds an instance after checking that `graph` has the configured weight dimension.
    /// A `time_limit` of `config` is counted from the creation of the instance, a `node_limit`
    /// over all runs of the instance.
    pub fn new(graph: Graph<'a>, config: SolverConfig) -> Result<Self, ProcessingError> {
        config.check(graph.arena())?;
        let mut stop = match config.time_limit {
            Some(limit) => StopToken::with_time_limit(limit),
            None => StopToken::new(),
        };
        if let Some(limit) = config.node_limit {
            stop = stop.with_check_limit(limit);
        }
        Ok(MwcInstance {
            graph,
            current_best: Cliques::new(),
            stop,
            nodes_explored: 0,
        })
    }

    /// Replaces the stop token, e.g. to cancel the search from another thread.
    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_token(&self) -> &StopToken {
        &self.stop
    }

    pub fn arena(&self) -> &'a VertexArena {
        self.graph.arena()
    }

    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Inserts `clique` into the front of the best cliques, evicting every member it dominates.
    /// Returns `true` if `clique` was inserted.
    pub fn update_current_best(&mut self, clique: Clique) -> bool {
        let weight = clique.weight().clone();
        if self.current_best.try_insert(clique) {
            debug!("new incumbent with weight {} ({} in front)", weight, self.current_best.len());
            return true
        }
        false
    }

    /// Checks if every member of `cliques` is a clique of `self.graph` with the correct weight
    /// and no member weighs at most as much as another one.
    pub fn validate_solution(&self, cliques: &Cliques) -> Result<(), ProcessingError> {
        let arena = self.arena();
        let members: Vec<&Clique> = cliques.iter().collect();
        for (i, clique) in members.iter().enumerate() {
            if !self.graph.is_clique(clique.members()) {
                return Err(ProcessingError::InvalidSolution(
                    format!("{} is not a clique", clique.display(arena))
                ))
            }
            if clique.members().weight(arena) != *clique.weight() {
                return Err(ProcessingError::InvalidSolution(
                    format!("{} has a wrong weight", clique.display(arena))
                ))
            }
            for other in &members[i+1..] {
                if clique.weight().dominated_by(other.weight()) || other.weight().dominated_by(clique.weight()) {
                    return Err(ProcessingError::InvalidSolution(
                        format!("{} and {} are comparable", clique.display(arena), other.display(arena))
                    ))
                }
            }
        }
        Ok(())
    }
}

impl MwcInstance<'_> {

    /// Writes a front of cliques to a `Write` type, one clique per line.
    pub fn write_solution<W: Write>(cliques: &Cliques, arena: &VertexArena, mut out: W) -> Result<(), io::Error> {
        for clique in cliques.iter() {
            writeln!(out, "{}", clique.display(arena))?;
        }
        Ok(())
    }
}
