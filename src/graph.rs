//! Implementation of a vertex arena that owns all weighted vertices of an input graph, and of an
//! undirected graph view over (a subset of) that arena with basic static and dynamic functions.

use crate::cust_error::ImportError;
use crate::vertex_set::VertexSet;
use crate::weight::Weight;
use fxhash::{FxHashMap, FxHashSet};
use log::info;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

/// Index of a vertex in its `VertexArena`.
pub type VertexId = usize;

/// A weighted vertex. `id` is the (1-based) number it was given in the input.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Vertex {
    pub id: usize,
    pub weight: Weight,
    neighbors: Vec<VertexId>,
}

/// Owns all vertices and edges of an input graph. Vertices are only ever appended, so a
/// `VertexId` stays valid for the lifetime of the arena.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct VertexArena {
    dimension: usize,
    vertices: Vec<Vertex>,
    edges: Vec<(VertexId, VertexId)>,
}

impl VertexArena {

    pub fn new(dimension: usize) -> Self {
        VertexArena {
            dimension,
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a vertex with input number `id` and returns its index.
    ///
    /// Panics if `weight` does not have the dimension of `self`.
    pub fn add_vertex(&mut self, id: usize, weight: Weight) -> VertexId {
        assert_eq!(weight.dimension(), self.dimension, "weight dimension does not fit the arena");
        self.vertices.push(Vertex { id, weight, neighbors: Vec::new() });
        self.vertices.len() - 1
    }

    /// Connects `a` and `b`, unless they are already connected.
    /// Returns `true` if a new edge was created.
    pub fn connect(&mut self, a: VertexId, b: VertexId) -> bool {
        if self.vertices[a].neighbors.contains(&b) {
            return false
        }
        self.vertices[a].neighbors.push(b);
        self.vertices[b].neighbors.push(a);
        self.edges.push((a, b));
        true
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn weight(&self, node: VertexId) -> &Weight {
        &self.vertices[node].weight
    }

    pub fn id(&self, node: VertexId) -> usize {
        self.vertices[node].id
    }

    /// Returns all neighbors of `node` in the input graph.
    pub fn neighbors(&self, node: VertexId) -> &[VertexId] {
        &self.vertices[node].neighbors
    }

    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    /// Returns the per-dimension sum of all vertex weights, or `None` if it exceeds `i64::MAX`.
    pub fn total_weight(&self) -> Option<Weight> {
        let mut totals = vec![0i64; self.dimension];
        for vertex in &self.vertices {
            for (total, value) in totals.iter_mut().zip(vertex.weight.values()) {
                *total = total.checked_add(*value)?;
            }
        }
        Some(Weight::from(totals))
    }

    /// Returns the graph over all vertices and edges of `self`.
    pub fn graph(&self) -> Graph<'_> {
        let mut adj_list = FxHashMap::default();
        for (node, vertex) in self.vertices.iter().enumerate() {
            adj_list.insert(node, vertex.neighbors.iter().copied().collect());
        }
        Graph {
            arena: self,
            nodes: (0..self.vertices.len()).collect(),
            adj_list,
        }
    }
}

/// An undirected graph over a subset of the vertices of a `VertexArena`.
#[derive(Debug, Clone)]
pub struct Graph<'a> {
    arena: &'a VertexArena,
    nodes: Vec<VertexId>,
    adj_list: FxHashMap<VertexId, FxHashSet<VertexId>>,
}

// Static functions
impl<'a> Graph<'a> {

    pub fn arena(&self) -> &'a VertexArena {
        self.arena
    }

    /// Returns the nodes of `self` in insertion order.
    pub fn nodes(&self) -> &[VertexId] {
        &self.nodes
    }

    pub fn vertex_set(&self) -> VertexSet {
        VertexSet::from(self.nodes.clone())
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adj_list.values().map(|neighbors| neighbors.len()).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: VertexId) -> bool {
        self.adj_list.contains_key(&node)
    }

    /// Returns the neighborhood of `node`, or `None` if `node` is not in `self`.
    pub fn neighbors(&self, node: VertexId) -> Option<&FxHashSet<VertexId>> {
        self.adj_list.get(&node)
    }

    /// Returns the degree of `node`, or `None` if `node` is not in `self`.
    pub fn degree(&self, node: VertexId) -> Option<usize> {
        self.adj_list.get(&node).map(|neighbors| neighbors.len())
    }

    /// Returns every node paired with its degree.
    pub fn compute_degrees(&self) -> Vec<(VertexId, usize)> {
        self.nodes.iter()
            .map(|node| (*node, self.adj_list[node].len()))
            .collect()
    }

    /// Checks if the edge `(a, b)` exists.
    pub fn is_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.adj_list.get(&a).map_or(false, |neighbors| neighbors.contains(&b))
    }

    /// Returns an iterator over all edges, each reported once.
    pub fn edges(&self) -> impl Iterator<Item=(VertexId, VertexId)> + '_ {
        self.nodes.iter().flat_map(move |a| {
            self.adj_list[a].iter()
                .filter(move |b| a < *b)
                .map(move |b| (*a, *b))
        })
    }

    pub fn weight(&self, node: VertexId) -> &'a Weight {
        self.arena.weight(node)
    }

    /// Returns the summed weight of the neighborhood of `node` in `self`.
    pub fn neighborhood_weight(&self, node: VertexId) -> Weight {
        let mut total = Weight::zero(self.arena.dimension());
        if let Some(neighbors) = self.adj_list.get(&node) {
            for neighbor in neighbors {
                total += self.arena.weight(*neighbor);
            }
        }
        total
    }

    /// Returns the nodes of `candidates` that are adjacent to `node`, in the order of `candidates`.
    pub fn neighbors_in(&self, node: VertexId, candidates: &VertexSet) -> VertexSet {
        candidates.iter()
            .filter(|other| self.is_adjacent(node, *other))
            .collect()
    }

    /// Returns the subgraph induced by `set`. Nodes of `set` that are not in `self` are ignored.
    pub fn induced_subgraph(&self, set: &VertexSet) -> Graph<'a> {
        let mut nodes = Vec::with_capacity(set.len());
        let mut adj_list: FxHashMap<VertexId, FxHashSet<VertexId>> = FxHashMap::default();
        for node in set.iter() {
            if self.contains(node) && !adj_list.contains_key(&node) {
                adj_list.insert(node, FxHashSet::default());
                nodes.push(node);
            }
        }
        for node in &nodes {
            let kept: FxHashSet<VertexId> = self.adj_list[node].iter()
                .copied()
                .filter(|neighbor| adj_list.contains_key(neighbor))
                .collect();
            adj_list.insert(*node, kept);
        }
        Graph {
            arena: self.arena,
            nodes,
            adj_list,
        }
    }

    /// Checks if `set` is a clique in `self`.
    pub fn is_clique(&self, set: &VertexSet) -> bool {
        let nodes = set.as_slice();
        for (i, a) in nodes.iter().enumerate() {
            if !self.contains(*a) {
                return false
            }
            if nodes[i+1..].iter().any(|b| !self.is_adjacent(*a, *b)) {
                return false
            }
        }
        true
    }
}

// Dynamic functions
impl<'a> Graph<'a> {

    /// Tries to delete `node` and all its incident edges.
    /// Returns the old neighborhood of `node` or `None` if nothing was deleted.
    pub fn remove_vertex(&mut self, node: VertexId) -> Option<FxHashSet<VertexId>> {
        let neighborhood = self.adj_list.remove(&node)?;
        for neighbor in &neighborhood {
            if let Some(nn) = self.adj_list.get_mut(neighbor) {
                nn.remove(&node);
            }
        }
        self.nodes.retain(|v| *v != node);
        Some(neighborhood)
    }

    /// Removes all nodes in `node_set` from the graph.
    pub fn remove_vertices(&mut self, node_set: &FxHashSet<VertexId>) {
        for node in node_set {
            if let Some(neighborhood) = self.adj_list.remove(node) {
                for neighbor in neighborhood.difference(node_set) {
                    if let Some(nn) = self.adj_list.get_mut(neighbor) {
                        nn.remove(node);
                    }
                }
            }
        }
        self.nodes.retain(|v| !node_set.contains(v));
    }
}

/// Parses the next whitespace separated token of `tokens` as an integer.
fn next_int<'t, T: std::str::FromStr<Err=std::num::ParseIntError>>(
    tokens: &mut impl Iterator<Item=&'t str>,
    line_nr: usize,
    what: &str,
) -> Result<T, ImportError> {
    let token = tokens.next()
        .ok_or_else(|| ImportError::InputMalformedError(line_nr, format!("missing {}", what)))?;
    Ok(token.parse::<T>()?)
}

/// Returns the non-empty, non-comment lines of `input` together with their line numbers.
fn content_lines<R: BufRead>(input: R) -> impl Iterator<Item=(usize, io::Result<String>)> {
    input.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| {
            if let Ok(line) = line {
                // ignore empty lines and comment lines
                let trimmed = line.trim();
                !trimmed.starts_with('%') && !trimmed.is_empty()
            } else {
                true
            }
        })
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Vertex weights followed by edges, see `VertexArena::read_wgr`.
    Wgr,
    /// Plain edge list with unit weights.
    Edges,
}

impl FromStr for FileFormat {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wgr" => Ok(FileFormat::Wgr),
            "edges" => Ok(FileFormat::Edges),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown format: {}", s),
            )),
        }
    }
}

impl VertexArena {

    /// Reads a weighted graph in the `.wgr` format:
    /// ```text
    /// % comment
    /// i <n> w <d>
    /// <w_1> ... <w_d>      (n lines, line k holds the weights of vertex k)
    /// <a> <b>              (one edge per line, 1-based)
    /// ```
    /// Duplicate edges are only added once.
    pub fn read_wgr<R: BufRead>(input: R) -> Result<Self, ImportError> {
        let mut lines = content_lines(input);
        // i <n> w <d>
        let (n, dimension) = {
            let (line_nr, line) = lines.next()
                .ok_or_else(|| ImportError::InputMalformedError(0, "missing header".to_owned()))?;
            let line = line?;
            let mut s = line.split_whitespace();
            if let Some("i") = s.next() {} else {
                return Err(ImportError::InputMalformedError(line_nr, "expected `i <n> w <d>`".to_owned()));
            }
            let n: usize = next_int(&mut s, line_nr, "vertex count")?;
            if let Some("w") = s.next() {} else {
                return Err(ImportError::InputMalformedError(line_nr, "expected `i <n> w <d>`".to_owned()));
            }
            let dimension: usize = next_int(&mut s, line_nr, "weight count")?;
            if s.next().is_some() {
                return Err(ImportError::InputMalformedError(line_nr, "trailing tokens in header".to_owned()));
            }
            if dimension == 0 {
                return Err(ImportError::InputMalformedError(line_nr, "at least one weight per vertex is required".to_owned()));
            }
            (n, dimension)
        };
        let mut arena = VertexArena::new(dimension);
        // Per-dimension sums of all weights; every clique weighs at most this much.
        let mut totals = vec![0i64; dimension];
        for id in 1..=n {
            let (line_nr, line) = lines.next()
                .ok_or_else(|| ImportError::InputMalformedError(0, format!("missing weights of vertex {}", id)))?;
            let line = line?;
            let mut s = line.split_whitespace();
            let mut values = Vec::with_capacity(dimension);
            for _ in 0..dimension {
                let value: i64 = next_int(&mut s, line_nr, "weight")?;
                if value < 0 {
                    return Err(ImportError::InputMalformedError(line_nr, "negative weight".to_owned()));
                }
                let total = &mut totals[values.len()];
                *total = total.checked_add(value)
                    .ok_or_else(|| ImportError::InputMalformedError(line_nr, "total weight exceeds i64::MAX".to_owned()))?;
                values.push(value);
            }
            if s.next().is_some() {
                return Err(ImportError::InputMalformedError(line_nr, format!("expected {} weights", dimension)));
            }
            arena.add_vertex(id, Weight::from(values));
        }
        for (line_nr, line) in lines {
            // <a> <b>
            let line = line?;
            let mut s = line.split_whitespace();
            let a: usize = next_int(&mut s, line_nr, "edge source")?;
            let b: usize = next_int(&mut s, line_nr, "edge target")?;
            if s.next().is_some() {
                return Err(ImportError::InputMalformedError(line_nr, "expected `<a> <b>`".to_owned()));
            }
            if a == 0 || b == 0 || a > n || b > n {
                return Err(ImportError::InputMalformedError(line_nr, format!("vertex out of range 1..={}", n)));
            }
            if a == b {
                return Err(ImportError::InputMalformedError(line_nr, "self loop".to_owned()));
            }
            arena.connect(a - 1, b - 1);
        }
        Ok(arena)
    }

    /// Reads a plain edge list (`<a> <b>` per line, `%` comments). Vertices are created on first
    /// sight and get the weight `1` in each of the `dimension` dimensions.
    pub fn read_edge_list<R: BufRead>(input: R, dimension: usize) -> Result<Self, ImportError> {
        let mut arena = VertexArena::new(dimension);
        let mut index: FxHashMap<usize, VertexId> = FxHashMap::default();
        for (line_nr, line) in content_lines(input) {
            let line = line?;
            let mut s = line.split_whitespace();
            let a: usize = next_int(&mut s, line_nr, "edge source")?;
            let b: usize = next_int(&mut s, line_nr, "edge target")?;
            if s.next().is_some() {
                return Err(ImportError::InputMalformedError(line_nr, "expected `<a> <b>`".to_owned()));
            }
            if a == b {
                return Err(ImportError::InputMalformedError(line_nr, "self loop".to_owned()));
            }
            let mut lookup = |id: usize| -> VertexId {
                *index.entry(id)
                    .or_insert_with(|| arena.add_vertex(id, Weight::uniform(dimension, 1)))
            };
            let va = lookup(a);
            let vb = lookup(b);
            arena.connect(va, vb);
        }
        Ok(arena)
    }

    /// Reads the graph file at `path`. `dimension` is only used by formats without weights.
    pub fn try_read_graph(format: FileFormat, path: impl AsRef<Path>, dimension: usize) -> Result<Self, ImportError> {
        let file = File::open(path)?;
        let buf_reader = BufReader::new(file);
        let arena = match format {
            FileFormat::Wgr => VertexArena::read_wgr(buf_reader)?,
            FileFormat::Edges => VertexArena::read_edge_list(buf_reader, dimension)?,
        };
        info!(
            "Read graph with n={}, m={} and {} weight(s) per vertex",
            arena.num_vertices(),
            arena.num_edges(),
            arena.dimension()
        );
        Ok(arena)
    }

    /// Writes `self` in the `.wgr` format. Vertices are renumbered by their position.
    pub fn write_wgr<W: Write>(&self, mut out: W) -> Result<(), io::Error> {
        writeln!(out, "%edges: {}", self.num_edges())?;
        writeln!(out, "i {} w {}", self.num_vertices(), self.dimension)?;
        for vertex in &self.vertices {
            let values: Vec<String> = vertex.weight.values().iter().map(|v| v.to_string()).collect();
            writeln!(out, "{}", values.join(" "))?;
        }
        for (a, b) in &self.edges {
            writeln!(out, "{} {}", a + 1, b + 1)?;
        }
        Ok(())
    }
}
