use core::fmt;

/// Result alias for `rift`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by graph construction and the peeling algorithms.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input graph had no nodes.
    EmptyInput,

    /// An edge-list line could not be parsed.
    BadEdgeLine {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong with the line.
        reason: String,
    },

    /// An edge endpoint fell outside `[0, node_count)`.
    NodeOutOfRange {
        /// Offending node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// An edge sign other than +1 or -1.
    InvalidSign {
        /// The sign that was given.
        sign: i64,
    },

    /// Labeling length does not match the graph's node count.
    LengthMismatch {
        /// Expected length (node count).
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// Failure reading an edge-list file.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::BadEdgeLine { line, reason } => {
                write!(f, "malformed edge line {line}: {reason}")
            }
            Error::NodeOutOfRange { node, node_count } => {
                write!(f, "node {node} out of range for graph with {node_count} nodes")
            }
            Error::InvalidSign { sign } => {
                write!(f, "edge sign must be +1 or -1, got {sign}")
            }
            Error::LengthMismatch { expected, found } => {
                write!(f, "labeling length mismatch: expected {expected}, found {found}")
            }
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
