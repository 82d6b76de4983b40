//! The enumeration driver (spec.md §4.5) and its two query families: the
//! HIST-aware search (`find_hists`) and the supplemental unconstrained
//! spanning-tree search (`find_spanning_trees`, see `SPEC_FULL.md`'s
//! `[MODULE: enumerate]`, grounded on `spanning_tree.c`'s simpler,
//! non-pruning walk).

use crate::counters::Counters;
use crate::graph::Graph;
use crate::overlay::OverlayGraph;

/// A sink for enumerated trees. `report` returns `false` to ask the
/// driver to stop early — used together with `find_one` by existence
/// queries, which only need one match, not the full enumeration.
pub trait Reporter {
    fn report(&mut self, tree: Graph) -> bool;
}

/// Discards every reported tree; use when only the [`Counters`] totals
/// are of interest.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _tree: Graph) -> bool {
        true
    }
}

/// Keeps the last reported tree. Paired with `find_one = true`, this is
/// an existence probe that also hands back a witness.
#[derive(Debug, Default)]
pub struct FirstMatchReporter {
    pub found: Option<Graph>,
}

impl Reporter for FirstMatchReporter {
    fn report(&mut self, tree: Graph) -> bool {
        self.found = Some(tree);
        false
    }
}

/// Collects every reported tree, in report order. Used by the CLI's
/// "emit enumerated trees" query and by tests.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub trees: Vec<Graph>,
}

impl Reporter for CollectingReporter {
    fn report(&mut self, tree: Graph) -> bool {
        self.trees.push(tree);
        true
    }
}

/// Enumerates the homeomorphically irreducible spanning trees of `graph`
/// with the vertices in `hidden_vertices` excluded from the search,
/// reporting each to `reporter` (if given) and accumulating `counters`.
/// If `find_one` is set, the search stops after the first HIST. Returns
/// whether at least one HIST was found.
pub fn find_hists(
    graph: &Graph,
    hidden_vertices: u64,
    reporter: Option<&mut dyn Reporter>,
    find_one: bool,
    counters: &mut Counters,
) -> bool {
    let _span = tracing::debug_span!("find_hists", vertices = graph.vertices(), hidden_vertices).entered();
    let mut overlay = OverlayGraph::new(graph, hidden_vertices);
    counters.start_run();
    hists_recursive(&mut overlay, reporter, find_one, counters);
    counters.finish_run();
    tracing::trace!(hists = counters.hists_this_run, trees = counters.trees_this_run, "find_hists finished");
    counters.hists_this_run > 0
}

/// Recursive include/exclude search over candidate edges from
/// [`OverlayGraph::next_edge`], pruned by
/// [`OverlayGraph::hist_impossible`]. Checks for a finished tree before
/// ever asking for a candidate edge, matching `adjlist.c`'s `hists_alg`.
/// Returns `false` once the search should stop (the reporter asked to,
/// or `find_one` was satisfied).
fn hists_recursive(
    overlay: &mut OverlayGraph,
    mut reporter: Option<&mut dyn Reporter>,
    find_one: bool,
    counters: &mut Counters,
) -> bool {
    if overlay.is_tree_complete() {
        counters.trees_this_run += 1;
        if overlay.is_hist() {
            counters.hists_this_run += 1;
            let keep_from_reporter = match reporter.as_deref_mut() {
                Some(r) => r.report(overlay.extract_tree()),
                None => true,
            };
            return keep_from_reporter && !find_one;
        }
        return true;
    }

    let Some((edge_index, both_in_tree)) = overlay.next_edge() else {
        return true;
    };

    let mut keep_going = true;
    if !both_in_tree {
        overlay.add_edge_to_tree(edge_index);
        keep_going = hists_recursive(overlay, reporter.as_deref_mut(), find_one, counters);
        overlay.remove_edge_from_tree(edge_index);
    }

    if keep_going {
        overlay.remove_edge_from_graph(edge_index);
        if !overlay.hist_impossible(edge_index) {
            keep_going = hists_recursive(overlay, reporter.as_deref_mut(), find_one, counters);
        }
        overlay.add_edge_to_graph(edge_index);
    }

    keep_going
}

/// Enumerates every spanning tree of `graph`, with no HIST restriction
/// (supplemental query (a) of spec.md §1, dropped from spec.md §6's
/// interface list but present in the original as a standalone routine).
/// Same calling convention as [`find_hists`], minus the hidden-vertices
/// parameter — hiding a vertex has no use case for the plain query.
pub fn find_spanning_trees(
    graph: &Graph,
    reporter: Option<&mut dyn Reporter>,
    find_one: bool,
    counters: &mut Counters,
) -> bool {
    let _span = tracing::debug_span!("find_spanning_trees", vertices = graph.vertices()).entered();
    let mut overlay = OverlayGraph::new(graph, 0);
    counters.start_run();
    spanning_trees_recursive(&mut overlay, reporter, find_one, counters);
    counters.finish_run();
    tracing::trace!(trees = counters.trees_this_run, "find_spanning_trees finished");
    counters.trees_this_run > 0
}

fn spanning_trees_recursive(
    overlay: &mut OverlayGraph,
    mut reporter: Option<&mut dyn Reporter>,
    find_one: bool,
    counters: &mut Counters,
) -> bool {
    let Some(edge_index) = overlay.next_edge_plain() else {
        if overlay.is_tree_complete() {
            counters.trees_this_run += 1;
            let keep_from_reporter = match reporter.as_deref_mut() {
                Some(r) => r.report(overlay.extract_tree()),
                None => true,
            };
            return keep_from_reporter && !find_one;
        }
        return true;
    };

    overlay.add_edge_to_tree(edge_index);
    let mut keep_going = spanning_trees_recursive(overlay, reporter.as_deref_mut(), find_one, counters);
    overlay.remove_edge_from_tree(edge_index);

    if keep_going {
        overlay.remove_edge_from_graph(edge_index);
        if !overlay.spanning_impossible(edge_index) {
            keep_going = spanning_trees_recursive(overlay, reporter.as_deref_mut(), find_one, counters);
        }
        overlay.add_edge_to_graph(edge_index);
    }

    keep_going
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k4() -> Graph {
        Graph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap()
    }

    #[test]
    fn k4_has_exactly_four_hists() {
        let mut counters = Counters::new();
        let mut reporter = CollectingReporter::default();
        let found = find_hists(&k4(), 0, Some(&mut reporter), false, &mut counters);

        assert!(found);
        assert_eq!(counters.hists_this_run, 4);
        assert_eq!(reporter.trees.len(), 4);
        assert!(counters.hists_this_run <= counters.trees_this_run);
        assert!(counters.trees_this_run <= 16);
        for tree in &reporter.trees {
            assert!((0..4).all(|v| tree.degree(v) != 2));
        }
    }

    #[test]
    fn k4_has_sixteen_spanning_trees() {
        let mut counters = Counters::new();
        let found = find_spanning_trees(&k4(), None, false, &mut counters);

        assert!(found);
        assert_eq!(counters.trees_this_run, 16);
    }

    #[test]
    fn find_one_stops_after_the_first_hist() {
        let mut counters = Counters::new();
        let mut reporter = FirstMatchReporter::default();
        let found = find_hists(&k4(), 0, Some(&mut reporter), true, &mut counters);

        assert!(found);
        assert!(reporter.found.is_some());
        assert_eq!(counters.hists_this_run, 1);
    }

    #[test]
    fn k5_has_hists_with_degree_never_two() {
        let mut edges = Vec::new();
        for u in 0..5u8 {
            for v in (u + 1)..5u8 {
                edges.push((u, v));
            }
        }
        let k5 = Graph::from_edges(5, edges).unwrap();

        let mut counters = Counters::new();
        let mut reporter = CollectingReporter::default();
        let found = find_hists(&k5, 0, Some(&mut reporter), false, &mut counters);

        assert!(found);
        for tree in &reporter.trees {
            assert_eq!(tree.edge_count(), 4);
            assert!((0..5).all(|v| tree.degree(v) != 2));
        }
    }

    #[test]
    fn path_p5_has_no_hist_since_its_only_spanning_tree_is_itself() {
        let path = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let mut counters = Counters::new();
        let found = find_hists(&path, 0, None, false, &mut counters);
        assert!(!found);
    }

    #[test]
    fn star_has_exactly_one_hist_which_is_itself() {
        let star = Graph::from_edges(6, [(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]).unwrap();
        let mut counters = Counters::new();
        let found = find_hists(&star, 0, None, false, &mut counters);

        assert!(found);
        assert_eq!(counters.hists_this_run, 1);
    }

    #[test]
    fn triangle_has_no_hist() {
        let triangle = Graph::from_edges(3, [(0, 1), (1, 2), (0, 2)]).unwrap();
        let mut counters = Counters::new();
        let found = find_hists(&triangle, 0, None, false, &mut counters);

        assert!(!found);
        assert_eq!(counters.hists_this_run, 0);
    }

    #[test]
    fn hiding_a_vertex_searches_the_induced_subgraph() {
        // K4 minus any vertex is a triangle, which has no HIST.
        let mut counters = Counters::new();
        let found = find_hists(&k4(), crate::bitset::bit(0), None, false, &mut counters);
        assert!(!found);
    }
}
