//! Hypohisterian-ness (spec.md §4.6): `graph` is hypohisterian iff it has
//! no HIST of its own, yet every single-vertex deletion does. Both halves
//! reuse [`crate::enumerate::find_hists`] with one vertex hidden at a
//! time — exactly the facility `hidden_vertices` exists for — and with
//! `find_one = true`, since existence is all either half needs.

use crate::bitset::bit;
use crate::counters::Counters;
use crate::enumerate::{find_hists, Reporter};
use crate::graph::Graph;

/// True iff every single-vertex deletion of `graph` has a HIST. This is
/// the "every proper subgraph" half of hypohisterian-ness; it says
/// nothing about whether `graph` itself has one.
pub fn is_hypohist_partials(
    graph: &Graph,
    mut reporter: Option<&mut dyn Reporter>,
    counters: &mut Counters,
) -> bool {
    for v in 0..graph.vertices() {
        tracing::debug!(vertex = v, "checking for a hist after hiding one vertex");
        if !find_hists(graph, bit(v), reporter.as_deref_mut(), true, counters) {
            return false;
        }
    }
    true
}

/// True iff `graph` has no HIST of its own, but every single-vertex
/// deletion does (spec.md §6, interface #3). When `only_partials` is
/// set, the caller already knows `graph` itself has no HIST (typically
/// because it just ran `find_hists` and got zero), so that half of the
/// check is skipped.
pub fn is_hypohist(
    graph: &Graph,
    mut reporter: Option<&mut dyn Reporter>,
    only_partials: bool,
    counters: &mut Counters,
) -> bool {
    if !only_partials && find_hists(graph, 0, reporter.as_deref_mut(), true, counters) {
        return false;
    }
    is_hypohist_partials(graph, reporter, counters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k4() -> Graph {
        Graph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap()
    }

    fn k5() -> Graph {
        let mut edges = Vec::new();
        for u in 0..5u8 {
            for v in (u + 1)..5u8 {
                edges.push((u, v));
            }
        }
        Graph::from_edges(5, edges).unwrap()
    }

    #[test]
    fn k4_is_not_hypohist_since_it_already_has_a_hist() {
        let mut counters = Counters::new();
        assert!(!is_hypohist(&k4(), None, false, &mut counters));
    }

    #[test]
    fn k4_partials_fail_since_every_triangle_subgraph_lacks_a_hist() {
        // K4 minus any vertex is a triangle; a triangle's only spanning
        // trees are paths, which always have a degree-2 vertex.
        let mut counters = Counters::new();
        assert!(!is_hypohist_partials(&k4(), None, &mut counters));
    }

    #[test]
    fn k5_partials_hold_since_every_k4_subgraph_has_a_star_hist() {
        let mut counters = Counters::new();
        assert!(is_hypohist_partials(&k5(), None, &mut counters));
    }

    #[test]
    fn k5_is_not_hypohist_since_k5_itself_has_a_hist() {
        // K5's own star spanning trees are HISTs, so the "no HIST of its
        // own" half of the definition fails even though the partials hold.
        let mut counters = Counters::new();
        assert!(!is_hypohist(&k5(), None, false, &mut counters));
    }

    #[test]
    fn cycle_c6_is_not_hypohist_since_every_deletion_is_a_path_with_no_hist() {
        // C6 minus any vertex is P5, whose only spanning tree is itself
        // and has degree-2 internal vertices, so the partials half fails
        // too — C6 is not hypohist for two independent reasons.
        let c6 = Graph::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]).unwrap();
        let mut counters = Counters::new();
        assert!(!is_hypohist(&c6, None, false, &mut counters));
    }

    #[test]
    fn only_partials_skips_the_whole_graph_check() {
        // K4 has a HIST, so a full is_hypohist call would short-circuit
        // to false immediately; only_partials bypasses that and reports
        // the (also false, but for a different reason) partials result.
        let mut counters = Counters::new();
        assert!(!is_hypohist(&k4(), None, true, &mut counters));
    }
}
