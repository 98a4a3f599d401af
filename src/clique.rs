//! Cliques with a cached total weight, and Pareto fronts of cliques.

use crate::graph::{VertexArena, VertexId};
use crate::vertex_set::VertexSet;
use crate::weight::{Weight, WeightFront};
use std::fmt;

/// A set of pairwise adjacent vertices together with its total weight.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Clique {
    members: VertexSet,
    weight: Weight,
}

impl Clique {

    /// Returns the empty clique of zero weight.
    pub fn empty(arena: &VertexArena) -> Self {
        Clique {
            members: VertexSet::new(),
            weight: Weight::zero(arena.dimension()),
        }
    }

    /// Returns the clique that only holds `node`.
    pub fn single(node: VertexId, arena: &VertexArena) -> Self {
        Clique {
            members: VertexSet::from(vec![node]),
            weight: arena.weight(node).clone(),
        }
    }

    /// Wraps `members` without checking adjacency.
    pub fn from_set(members: VertexSet, arena: &VertexArena) -> Self {
        let weight = members.weight(arena);
        Clique { members, weight }
    }

    /// Returns `self` extended by `node`.
    pub fn with_vertex(&self, node: VertexId, arena: &VertexArena) -> Self {
        if self.members.contains(node) {
            return self.clone()
        }
        let mut extended = self.clone();
        extended.members.push(node);
        extended.weight += arena.weight(node);
        extended
    }

    pub fn members(&self) -> &VertexSet {
        &self.members
    }

    pub fn weight(&self) -> &Weight {
        &self.weight
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns a printable form: ascending input ids followed by the total weight.
    pub fn display<'c>(&'c self, arena: &'c VertexArena) -> CliqueDisplay<'c> {
        CliqueDisplay { clique: self, arena }
    }
}

pub struct CliqueDisplay<'c> {
    clique: &'c Clique,
    arena: &'c VertexArena,
}

impl fmt::Display for CliqueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for id in self.clique.members.sorted_ids(self.arena) {
            write!(f, "{} ", id)?;
        }
        write!(f, "}}   weight: {}", self.clique.weight)
    }
}

/// A set of cliques none of which has a weight dominating (or equal to) the weight of another.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct Cliques {
    cliques: Vec<Clique>,
}

impl Cliques {

    pub fn new() -> Self {
        Cliques { cliques: Vec::new() }
    }

    /// Inserts `clique` unless its weight is dominated by (or equal to) the weight of a member.
    /// Members dominated by `clique` are evicted.
    /// Returns `true` if `clique` was inserted.
    pub fn try_insert(&mut self, clique: Clique) -> bool {
        if self.dominates(clique.weight()) {
            return false
        }
        self.cliques.retain(|member| !member.weight.dominated_by(&clique.weight));
        self.cliques.push(clique);
        true
    }

    /// Returns `true` if some member has a weight dominating or equal to `weight`.
    pub fn dominates(&self, weight: &Weight) -> bool {
        self.cliques.iter().any(|member| weight.dominated_by(&member.weight))
    }

    /// Returns the front of the member weights.
    pub fn weights(&self) -> WeightFront {
        WeightFront::from_weights(self.cliques.iter().map(|clique| clique.weight()))
    }

    pub fn first(&self) -> Option<&Clique> {
        self.cliques.first()
    }

    pub fn len(&self) -> usize {
        self.cliques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cliques.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&Clique> + '_ {
        self.cliques.iter()
    }

    /// Sorts the members by their ascending input ids, for a stable output.
    pub fn sort_by_ids(&mut self, arena: &VertexArena) {
        self.cliques.sort_by_cached_key(|clique| clique.members.sorted_ids(arena));
    }

    /// Returns a printable form with one clique per line.
    pub fn display<'c>(&'c self, arena: &'c VertexArena) -> CliquesDisplay<'c> {
        CliquesDisplay { cliques: self, arena }
    }
}

impl From<Clique> for Cliques {
    fn from(clique: Clique) -> Self {
        Cliques { cliques: vec![clique] }
    }
}

impl IntoIterator for Cliques {
    type Item = Clique;
    type IntoIter = std::vec::IntoIter<Clique>;

    fn into_iter(self) -> Self::IntoIter {
        self.cliques.into_iter()
    }
}

pub struct CliquesDisplay<'c> {
    cliques: &'c Cliques,
    arena: &'c VertexArena,
}

impl fmt::Display for CliquesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clique) in self.cliques.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", clique.display(self.arena))?;
        }
        Ok(())
    }
}
