//! Plain-text adjacency matrix format: one line per vertex, space-separated
//! `0`/`1` digits, ported from `print_graph_to_output_as_adjacency_matrix`
//! and `parse_adjacency_matrix_file`.

use crate::error::IoError;
use crate::graph::Graph;

/// Encodes `graph` as `n` lines of `n` space-separated digits.
pub fn encode(graph: &Graph) -> String {
    tracing::trace!(vertices = graph.vertices(), "encoding adjacency matrix");
    let n = graph.vertices();
    let mut out = String::new();
    for u in 0..n {
        for v in 0..n {
            if v > 0 {
                out.push(' ');
            }
            out.push(if graph.has_edge(u, v) { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

/// Parses a full adjacency matrix, one row per line of `lines`.
/// Whitespace within a row is ignored, matching the original's
/// `remove_spaces` preprocessing step. The matrix must be square: this is
/// stricter than the original parser, which derived the vertex count from
/// the first line alone and read at most that many further lines.
pub fn decode<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Graph, IoError> {
    let _span = tracing::debug_span!("decode_adjacency_matrix").entered();
    let rows: Vec<Vec<bool>> = lines.into_iter().map(parse_row).collect::<Result<_, _>>()?;
    if rows.is_empty() {
        return Err(IoError::EmptyInput);
    }

    let n = rows[0].len();
    if rows.len() != n {
        return Err(IoError::AdjacencyMatrixNotSquare { rows: rows.len(), found: n });
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(IoError::AdjacencyMatrixShape { row: i, len: row.len(), expected: n });
        }
    }

    let mut graph = Graph::empty(n as u8)?;
    for (u, row) in rows.iter().enumerate() {
        for (v, &present) in row.iter().enumerate() {
            if present && v > u {
                graph.add_edge(u as u8, v as u8)?;
            }
        }
    }
    Ok(graph)
}

fn parse_row(line: &str) -> Result<Vec<bool>, IoError> {
    let stripped: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Err(IoError::EmptyInput);
    }
    Ok(stripped.chars().map(|c| c == '1').collect())
}
