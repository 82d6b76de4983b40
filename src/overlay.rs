//! The mutable graph/tree overlay (spec.md §3, §4.2–§4.4).
//!
//! `OverlayGraph` bundles the fixed edge set of an input [`Graph`] with two
//! orthogonal mutable flags per edge — `removed` (not currently part of the
//! "remaining graph" view) and `selected` (currently part of the partial
//! tree) — plus the derived per-vertex degrees and extendable-vertex set
//! that those flags imply. Every mutator is O(1): it flips one flag and
//! patches the two affected vertices' derived state.
//!
//! Edges live in a single arena (`Vec<Edge>`) sized once at construction
//! and never reallocated; neighbour lists hold indices into that arena
//! rather than pointers, so they stay valid for the overlay's lifetime
//! without any unsafe code (spec.md §9, "stable references from
//! neighbour lists into the edge array").

use std::cell::Cell;

use crate::bitset::{self, bit};
use crate::graph::{Graph, MAX_VERTICES};

/// One edge of the overlay: a fixed pair of endpoints (`origin <
/// destination`) plus the two mutable flags the driver flips while
/// backtracking.
#[derive(Debug)]
struct Edge {
    origin: u8,
    destination: u8,
    removed: Cell<bool>,
    selected: Cell<bool>,
}

/// One entry of a vertex's neighbour list: the other endpoint, and the
/// arena index of the shared edge record.
#[derive(Debug, Clone, Copy)]
struct Neighbour {
    other: u8,
    edge: usize,
}

/// The overlay graph/tree combo the enumeration driver operates on.
///
/// See spec.md §3 ("OverlayGraph") for the field-level invariants I1–I7.
pub struct OverlayGraph {
    vertices: u8,
    available_vertices: u64,
    nb_available_vertices: u8,
    edges: Vec<Edge>,
    neighbours: Vec<Vec<Neighbour>>,
    d_nb_tree_edges: u32,
    d_graph_degrees: [u32; MAX_VERTICES as usize],
    d_tree_degrees: [u32; MAX_VERTICES as usize],
    extendable_vertices: u64,
}

impl OverlayGraph {
    /// Builds an overlay from `graph`, excluding every vertex set in
    /// `hidden_vertices` from the search (spec.md §4.2).
    pub fn new(graph: &Graph, hidden_vertices: u64) -> Self {
        let vertices = graph.vertices();
        let available_vertices = bitset::top_n_bits(vertices) & !hidden_vertices;
        let nb_available_vertices = bitset::popcount(available_vertices) as u8;

        let mut d_graph_degrees = [0u32; MAX_VERTICES as usize];
        for v in 0..vertices {
            if available_vertices & bit(v) != 0 {
                d_graph_degrees[v as usize] =
                    bitset::popcount(graph.row(v) & available_vertices);
            }
        }

        let mut edges = Vec::with_capacity(graph.edge_count() as usize);
        let mut neighbours = vec![Vec::new(); vertices as usize];
        for u in 0..vertices {
            if available_vertices & bit(u) == 0 {
                continue;
            }
            for w in (u + 1)..vertices {
                if available_vertices & bit(w) == 0 {
                    continue;
                }
                if graph.has_edge(u, w) {
                    let edge_index = edges.len();
                    edges.push(Edge {
                        origin: u,
                        destination: w,
                        removed: Cell::new(false),
                        selected: Cell::new(false),
                    });
                    neighbours[u as usize].push(Neighbour { other: w, edge: edge_index });
                    neighbours[w as usize].push(Neighbour { other: u, edge: edge_index });
                }
            }
        }

        tracing::trace!(vertices, edges = edges.len(), "constructed overlay graph");

        OverlayGraph {
            vertices,
            available_vertices,
            nb_available_vertices,
            edges,
            neighbours,
            d_nb_tree_edges: 0,
            d_graph_degrees,
            d_tree_degrees: [0; MAX_VERTICES as usize],
            extendable_vertices: 0,
        }
    }

    /// Number of available vertices (those not hidden at construction).
    #[inline]
    pub fn nb_available_vertices(&self) -> u8 {
        self.nb_available_vertices
    }

    /// I5: recomputes `extendable_vertices` for exactly the two endpoints
    /// of `edge_index`. Called after every flag transition.
    fn update_extendable_vertices(&mut self, edge_index: usize) {
        let edge = &self.edges[edge_index];
        for v in [edge.origin, edge.destination] {
            let vb = bit(v);
            let extendable = self.d_tree_degrees[v as usize] > 0
                && self.d_graph_degrees[v as usize] > self.d_tree_degrees[v as usize];
            if extendable {
                self.extendable_vertices |= vb;
            } else {
                self.extendable_vertices &= !vb;
            }
        }
    }

    /// `removed <- false`; restores `d_graph_degrees` for both endpoints.
    pub fn add_edge_to_graph(&mut self, edge_index: usize) {
        let edge = &self.edges[edge_index];
        debug_assert!(edge.removed.get(), "add_edge_to_graph on a non-removed edge");
        edge.removed.set(false);
        let (o, d) = (edge.origin as usize, edge.destination as usize);
        self.d_graph_degrees[o] += 1;
        self.d_graph_degrees[d] += 1;
        self.update_extendable_vertices(edge_index);
    }

    /// `removed <- true`; shrinks `d_graph_degrees` for both endpoints.
    pub fn remove_edge_from_graph(&mut self, edge_index: usize) {
        let edge = &self.edges[edge_index];
        debug_assert!(!edge.removed.get(), "remove_edge_from_graph on an already-removed edge");
        edge.removed.set(true);
        let (o, d) = (edge.origin as usize, edge.destination as usize);
        self.d_graph_degrees[o] -= 1;
        self.d_graph_degrees[d] -= 1;
        self.update_extendable_vertices(edge_index);
    }

    /// `selected <- true`; grows `d_tree_degrees` and `d_nb_tree_edges`.
    pub fn add_edge_to_tree(&mut self, edge_index: usize) {
        let edge = &self.edges[edge_index];
        debug_assert!(!edge.selected.get(), "add_edge_to_tree on an already-selected edge");
        edge.selected.set(true);
        let (o, d) = (edge.origin as usize, edge.destination as usize);
        self.d_tree_degrees[o] += 1;
        self.d_tree_degrees[d] += 1;
        self.d_nb_tree_edges += 1;
        self.update_extendable_vertices(edge_index);
    }

    /// `selected <- false`; shrinks `d_tree_degrees` and `d_nb_tree_edges`.
    pub fn remove_edge_from_tree(&mut self, edge_index: usize) {
        let edge = &self.edges[edge_index];
        debug_assert!(edge.selected.get(), "remove_edge_from_tree on a non-selected edge");
        edge.selected.set(false);
        let (o, d) = (edge.origin as usize, edge.destination as usize);
        self.d_tree_degrees[o] -= 1;
        self.d_tree_degrees[d] -= 1;
        self.d_nb_tree_edges -= 1;
        self.update_extendable_vertices(edge_index);
    }

    /// The partial tree is complete iff it spans every available vertex
    /// with exactly `nb_available_vertices - 1` edges (spec.md §4.4).
    pub fn is_tree_complete(&self) -> bool {
        match self.nb_available_vertices.checked_sub(1) {
            Some(needed) => self.d_nb_tree_edges == needed as u32,
            None => self.d_nb_tree_edges == 0,
        }
    }

    /// A complete tree is a HIST iff no available vertex has tree-degree 2.
    pub fn is_hist(&self) -> bool {
        let mut remaining = self.available_vertices;
        while remaining != 0 {
            let v = bitset::first_bit_position(remaining) as u8;
            remaining &= !bit(v);
            if self.d_tree_degrees[v as usize] == 2 {
                return false;
            }
        }
        true
    }

    /// Local pruning: a HIST is impossible from here iff an endpoint of
    /// `edge_index` is unreachable (`d_graph == 0`) or already forced to
    /// tree-degree 2 in every completion (`d_graph == 2 && d_tree == 2`).
    pub fn hist_impossible(&self, edge_index: usize) -> bool {
        let edge = &self.edges[edge_index];
        let (o, d) = (edge.origin as usize, edge.destination as usize);
        let unreachable = self.d_graph_degrees[o] == 0 || self.d_graph_degrees[d] == 0;
        let origin_forced = self.d_graph_degrees[o] == 2 && self.d_tree_degrees[o] == 2;
        let destination_forced = self.d_graph_degrees[d] == 2 && self.d_tree_degrees[d] == 2;
        unreachable || origin_forced || destination_forced
    }

    /// Local pruning for the plain (non-HIST) spanning-tree search: a
    /// spanning tree is impossible from here iff an endpoint of
    /// `edge_index` is unreachable (`d_graph == 0`). No forced-degree-2
    /// check, since a degree-2 vertex is unremarkable outside the HIST
    /// search.
    pub fn spanning_impossible(&self, edge_index: usize) -> bool {
        let edge = &self.edges[edge_index];
        let (o, d) = (edge.origin as usize, edge.destination as usize);
        self.d_graph_degrees[o] == 0 || self.d_graph_degrees[d] == 0
    }

    /// Picks the origin vertex for the next candidate edge: minimum
    /// `d_graph_degrees` among `candidates`, ties broken by smallest
    /// vertex number (spec.md §4.4 step 2).
    fn min_degree_vertex(&self, candidates: u64) -> Option<u8> {
        let mut remaining = candidates;
        let mut best: Option<(u8, u32)> = None;
        while remaining != 0 {
            let v = bitset::first_bit_position(remaining) as u8;
            remaining &= !bit(v);
            let degree = self.d_graph_degrees[v as usize];
            if best.map_or(true, |(_, best_degree)| degree < best_degree) {
                best = Some((v, degree));
            }
        }
        best.map(|(v, _)| v)
    }

    /// Picks the neighbour of `origin`, among live (non-removed,
    /// non-selected) incident edges satisfying `filter`, whose other
    /// endpoint has minimum `d_graph_degrees`, ties broken by
    /// canonical-insertion-order first encountered (spec.md §4.4 step 3).
    fn min_degree_neighbour(
        &self,
        origin: u8,
        filter: impl Fn(&Self, u8) -> bool,
    ) -> Option<(usize, u8)> {
        let mut best: Option<(usize, u8, u32)> = None;
        for neighbour in &self.neighbours[origin as usize] {
            let edge = &self.edges[neighbour.edge];
            if edge.removed.get() || edge.selected.get() {
                continue;
            }
            if !filter(self, neighbour.other) {
                continue;
            }
            let degree = self.d_graph_degrees[neighbour.other as usize];
            if best.map_or(true, |(_, _, best_degree)| degree < best_degree) {
                best = Some((neighbour.edge, neighbour.other, degree));
            }
        }
        best.map(|(edge, other, _)| (edge, other))
    }

    /// Next candidate edge for the HIST-aware search: minimum-degree-first
    /// selection with no restriction on the destination's tree membership
    /// (spec.md §4.4). Returns `(edge_index, both_in_tree)`.
    pub fn next_edge(&self) -> Option<(usize, bool)> {
        let available_origins = if self.d_nb_tree_edges == 0 {
            self.available_vertices
        } else {
            self.extendable_vertices
        };
        let origin = self.min_degree_vertex(available_origins)?;
        debug_assert!(
            self.d_nb_tree_edges == 0 || self.d_tree_degrees[origin as usize] > 0,
            "an origin drawn from extendable_vertices must already be in the partial tree"
        );
        let (edge_index, other) = self.min_degree_neighbour(origin, |_, _| true)?;
        let both_in_tree = self.d_tree_degrees[other as usize] > 0;
        Some((edge_index, both_in_tree))
    }

    /// Next candidate edge for the unconstrained spanning-tree walk: same
    /// origin selection, but the destination is required to not already
    /// be in the tree, so every returned edge is cycle-safe by
    /// construction (see `find_spanning_trees` in `enumerate.rs`, and
    /// spec.md's supplemental query (a)).
    pub fn next_edge_plain(&self) -> Option<usize> {
        let available_origins = if self.d_nb_tree_edges == 0 {
            self.available_vertices
        } else {
            self.extendable_vertices
        };
        let origin = self.min_degree_vertex(available_origins)?;
        let (edge_index, _other) =
            self.min_degree_neighbour(origin, |this, other| this.d_tree_degrees[other as usize] == 0)?;
        Some(edge_index)
    }

    /// Materialises the currently-selected edges as a standalone [`Graph`],
    /// in edge-array insertion order (spec.md §4.2, "Extracting the
    /// current tree"). Invoked only on the reporting path.
    pub fn extract_tree(&self) -> Graph {
        let mut tree =
            Graph::empty(self.vertices).expect("vertex count was already validated by the source graph");
        for edge in &self.edges {
            if edge.selected.get() {
                tree.add_edge(edge.origin, edge.destination)
                    .expect("edge endpoints were already validated at overlay construction");
            }
        }
        tree
    }
}
