//! The [graph6](https://users.cecs.anu.edu.au/~bdm/data/formats.txt)
//! textual format: one printable-ASCII line per graph. Ported from the
//! original's `get_graph6_string`/`parse_graph6_line`, including its
//! 62-vertex ceiling (the original extends to 64 vertices with a 4-byte
//! header it never actually implements) and its `>>graph6<<` stream
//! header skip.

use crate::error::IoError;
use crate::graph::Graph;

const CHAR_OFFSET: u8 = 63;
const MAX_GRAPH6_VERTICES: usize = 62;
const STREAM_HEADER: &str = ">>graph6<<";

/// Encodes `graph` as a single graph6 line (no trailing newline).
pub fn encode(graph: &Graph) -> Result<String, IoError> {
    tracing::trace!(vertices = graph.vertices(), "encoding graph6");
    let n = graph.vertices() as usize;
    if n > MAX_GRAPH6_VERTICES {
        return Err(IoError::Graph6TooLarge(n));
    }

    let mut bits = Vec::with_capacity(6 + n * n.saturating_sub(1) / 2);
    push_bits(&mut bits, n as u32, 6);
    for v in 1..graph.vertices() {
        for u in 0..v {
            bits.push(graph.has_edge(u, v));
        }
    }

    Ok(bits_to_ascii(bits))
}

/// Decodes a single graph6 line, skipping a leading `>>graph6<<` stream
/// header if present.
pub fn decode(line: &str) -> Result<Graph, IoError> {
    let _span = tracing::debug_span!("decode_graph6").entered();
    let line = line.strip_prefix(STREAM_HEADER).unwrap_or(line).trim();
    if line.is_empty() {
        return Err(IoError::EmptyInput);
    }

    let bits = ascii_to_bits(line)?;
    if bits.len() < 6 {
        return Err(IoError::Graph6(line.to_string()));
    }
    let (order_bits, rest) = bits.split_at(6);
    let n = bits_to_number(order_bits) as usize;
    if n > MAX_GRAPH6_VERTICES {
        return Err(IoError::Graph6TooLarge(n));
    }

    let expected_bits = n * n.saturating_sub(1) / 2;
    if rest.len() < expected_bits {
        return Err(IoError::Graph6(line.to_string()));
    }

    let mut graph = Graph::empty(n as u8)?;
    let mut bit_iter = rest.iter();
    for v in 1..n as u8 {
        for u in 0..v {
            if *bit_iter.next().expect("length checked against expected_bits above") {
                graph.add_edge(u, v)?;
            }
        }
    }
    Ok(graph)
}

fn push_bits(bits: &mut Vec<bool>, value: u32, width: u32) {
    for i in (0..width).rev() {
        bits.push((value >> i) & 1 == 1);
    }
}

fn bits_to_number(bits: &[bool]) -> u32 {
    bits.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32)
}

fn bits_to_ascii(mut bits: Vec<bool>) -> String {
    while bits.len() % 6 != 0 {
        bits.push(false);
    }
    bits.chunks(6)
        .map(|chunk| (CHAR_OFFSET + bits_to_number(chunk) as u8) as char)
        .collect()
}

fn ascii_to_bits(s: &str) -> Result<Vec<bool>, IoError> {
    let mut bits = Vec::with_capacity(s.len() * 6);
    for ch in s.chars() {
        let byte = ch as u32;
        if !(63..=126).contains(&byte) {
            return Err(IoError::Graph6(s.to_string()));
        }
        push_bits(&mut bits, byte - CHAR_OFFSET as u32, 6);
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_round_trips() {
        let g = Graph::empty(4).unwrap();
        let line = encode(&g).unwrap();
        let back = decode(&line).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn k4_round_trips() {
        let g = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        let line = encode(&g).unwrap();
        let back = decode(&line).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn stream_header_is_skipped() {
        let g = Graph::from_edges(3, [(0, 1)]).unwrap();
        let line = encode(&g).unwrap();
        let with_header = format!("{STREAM_HEADER}{line}");
        assert_eq!(decode(&with_header).unwrap(), g);
    }

    #[test]
    fn rejects_graphs_over_the_encoder_limit() {
        let g = Graph::empty(63).unwrap();
        assert!(matches!(encode(&g), Err(IoError::Graph6TooLarge(63))));
    }

    #[test]
    fn rejects_empty_line() {
        assert!(matches!(decode(""), Err(IoError::EmptyInput)));
    }

    #[test]
    fn rejects_out_of_range_characters() {
        assert!(matches!(decode("\u{7f}"), Err(IoError::Graph6(_))));
    }
}
