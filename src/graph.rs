//! The immutable input graph.
//!
//! A simple undirected graph on at most 64 vertices, stored as one `u64`
//! adjacency row per vertex under the MSB-first bit convention (see
//! [`crate::bitset`]). Symmetry — bit `63 - u` of row `v` equals bit
//! `63 - v` of row `u` — is an invariant maintained by every mutator.

use crate::bitset::{self, bit};
use crate::error::GraphError;

/// The largest vertex count this crate supports — a single `u64` must be
/// able to index every vertex. Raising this requires generalising every
/// bitset primitive to multi-word sets; see `SPEC_FULL.md`'s Non-goals.
pub const MAX_VERTICES: u8 = 64;

/// An immutable simple undirected graph on at most [`MAX_VERTICES`] vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    vertices: u8,
    edges: u32,
    adjacency: [u64; MAX_VERTICES as usize],
}

impl Graph {
    /// An edgeless graph on `vertices` vertices.
    pub fn empty(vertices: u8) -> Result<Self, GraphError> {
        if vertices > MAX_VERTICES {
            return Err(GraphError::TooManyVertices {
                vertices,
                max: MAX_VERTICES,
            });
        }
        Ok(Graph {
            vertices,
            edges: 0,
            adjacency: [0u64; MAX_VERTICES as usize],
        })
    }

    /// Builds a graph from an explicit edge list. Edges are undirected and
    /// deduplicated; self-loops and out-of-range endpoints are rejected.
    pub fn from_edges(
        vertices: u8,
        edges: impl IntoIterator<Item = (u8, u8)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::empty(vertices)?;
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Number of vertices.
    #[inline]
    pub fn vertices(&self) -> u8 {
        self.vertices
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> u32 {
        self.edges
    }

    /// The adjacency row for vertex `v` (bit `63 - u` set iff `uv` is an edge).
    #[inline]
    pub fn row(&self, v: u8) -> u64 {
        self.adjacency[v as usize]
    }

    /// Degree of vertex `v`.
    #[inline]
    pub fn degree(&self, v: u8) -> u32 {
        bitset::degree(self.row(v))
    }

    /// Whether `uv` is an edge of this graph.
    #[inline]
    pub fn has_edge(&self, u: u8, v: u8) -> bool {
        self.row(u) & bit(v) != 0
    }

    /// Inserts edge `uv`. Idempotent: re-adding an existing edge is a no-op.
    pub(crate) fn add_edge(&mut self, u: u8, v: u8) -> Result<(), GraphError> {
        self.check_endpoints(u, v)?;
        if !self.has_edge(u, v) {
            self.adjacency[u as usize] |= bit(v);
            self.adjacency[v as usize] |= bit(u);
            self.edges += 1;
        }
        Ok(())
    }

    /// Removes edge `uv` if present.
    pub(crate) fn remove_edge(&mut self, u: u8, v: u8) -> Result<(), GraphError> {
        self.check_endpoints(u, v)?;
        if self.has_edge(u, v) {
            self.adjacency[u as usize] &= !bit(v);
            self.adjacency[v as usize] &= !bit(u);
            self.edges -= 1;
        }
        Ok(())
    }

    fn check_endpoints(&self, u: u8, v: u8) -> Result<(), GraphError> {
        if u == v {
            return Err(GraphError::InvalidEdge { origin: u, destination: v });
        }
        if u >= self.vertices || v >= self.vertices {
            return Err(GraphError::InvalidEdge { origin: u, destination: v });
        }
        Ok(())
    }

    /// Whether the graph is connected (every vertex reachable from vertex 0).
    /// Not used by the enumerator itself — a diagnostic helper for the CLI
    /// and for tests, since the tree-completion predicate (`overlay`) only
    /// behaves as "spans the graph" on connected inputs (spec.md §4.4).
    pub fn is_connected(&self) -> bool {
        if self.vertices == 0 {
            return true;
        }
        let mut seen = bit(0);
        let mut frontier = bit(0);
        while frontier != 0 {
            let mut next = 0u64;
            let mut remaining = frontier;
            while remaining != 0 {
                let v = bitset::first_bit_position(remaining) as u8;
                remaining &= !bit(v);
                next |= self.row(v);
            }
            next &= !seen;
            seen |= next;
            frontier = next;
        }
        bitset::popcount(seen) == self.vertices as u32
    }

    /// Iterates over edges `(origin, destination)` with `origin < destination`,
    /// in canonical order (outer loop over origin, inner over destination).
    pub fn edges(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.vertices).flat_map(move |u| {
            (u + 1..self.vertices).filter_map(move |v| self.has_edge(u, v).then_some((u, v)))
        })
    }
}
