//! Solver configuration.

use crate::cust_error::ProcessingError;
use crate::graph::VertexArena;
use std::time::Duration;

/// Parameters of a `MwcInstance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of weights per vertex the input has to provide.
    pub dimension: usize,
    /// Stop the search after this duration and report the best cliques found so far.
    pub time_limit: Option<Duration>,
    /// Stop the search after this many driver steps and search nodes.
    pub node_limit: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            dimension: 1,
            time_limit: None,
            node_limit: None,
        }
    }
}

impl SolverConfig {

    pub fn with_dimension(dimension: usize) -> Self {
        SolverConfig {
            dimension,
            ..SolverConfig::default()
        }
    }

    /// Checks that `arena` provides as many weights per vertex as configured, and that the weight
    /// sums of the search cannot overflow.
    pub fn check(&self, arena: &VertexArena) -> Result<(), ProcessingError> {
        if self.dimension == 0 {
            return Err(ProcessingError::InvalidParameter("`dimension` has to be at least 1".to_owned()))
        }
        if arena.dimension() != self.dimension {
            return Err(ProcessingError::DimensionMismatch {
                expected: self.dimension,
                found: arena.dimension(),
            })
        }
        if arena.total_weight().is_none() {
            return Err(ProcessingError::InvalidParameter("total vertex weight exceeds i64::MAX".to_owned()))
        }
        Ok(())
    }
}
