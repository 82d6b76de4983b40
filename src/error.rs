//! Error taxonomy (spec.md §7).
//!
//! Enumeration-time "impossibility" and "zero HISTs found" are not errors
//! at all — the first is a pruning signal handled locally inside
//! [`crate::overlay::OverlayGraph::hist_impossible`], the second is a
//! legitimate `bool`/counter result of [`crate::enumerate::find_hists`].
//! Neither appears below. What remains are programmer/input-contract
//! violations: a graph with more than 64 vertices, a malformed edge, or a
//! malformed input file.

use thiserror::Error;

/// A violation of the `Graph` construction contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph has {vertices} vertices, but at most {max} are supported")]
    TooManyVertices { vertices: u8, max: u8 },

    #[error("invalid edge ({origin}, {destination}): endpoints must be distinct and in range")]
    InvalidEdge { origin: u8, destination: u8 },
}

/// A failure to parse or encode one of the supported textual graph formats.
#[derive(Debug, Error)]
pub enum IoError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("empty input line")]
    EmptyInput,

    #[error("invalid graph6 string: {0}")]
    Graph6(String),

    #[error("graph6 only supports up to 62 vertices in this encoder, got {0}")]
    Graph6TooLarge(usize),

    #[error("adjacency matrix row {row} has length {len}, expected {expected}")]
    AdjacencyMatrixShape { row: usize, len: usize, expected: usize },

    #[error("adjacency matrix is not square: {rows} rows, but the first row has {found} columns")]
    AdjacencyMatrixNotSquare { rows: usize, found: usize },
}

/// A failure while driving a query over a stream of input graphs: either
/// the underlying I/O failed, or one line of input did not parse.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Graph(#[from] IoError),
}
