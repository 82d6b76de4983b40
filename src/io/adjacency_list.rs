//! Plain-text adjacency list format: one line per vertex, `"<v>: <n1> <n2>
//! ..."`, 1-indexed. Ported from `print_graph_to_output_as_adjacency_list`.
//! Output only — the original format carries no vertex-count header, so it
//! has no corresponding parser there either.

use crate::graph::Graph;

/// Encodes `graph` as one 1-indexed adjacency line per vertex.
pub fn encode(graph: &Graph) -> String {
    tracing::trace!(vertices = graph.vertices(), "encoding adjacency list");
    let mut out = String::new();
    for u in 0..graph.vertices() {
        out.push_str(&(u + 1).to_string());
        out.push(':');
        for v in 0..graph.vertices() {
            if graph.has_edge(u, v) {
                out.push(' ');
                out.push_str(&(v + 1).to_string());
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_listed_one_indexed() {
        let g = Graph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
        assert_eq!(encode(&g), "1: 2\n2: 1 3\n3: 2\n");
    }
}
