//! Error types for sqlembed.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The formatted SQL did not give back every expression placeholder
    /// exactly once. Nothing is emitted for the template in that case.
    #[error(
        "couldn't insert all the expressions into the formatted SQL: \
         expected {expected} placeholder(s), found {found} (unmatched slots: {unmatched:?})"
    )]
    AssemblyMismatch {
        expected: usize,
        found: usize,
        unmatched: Vec<usize>,
    },

    /// Failure reported by a collaborator, e.g. the SQL formatter rejecting
    /// its input. Passed through untouched.
    #[error(transparent)]
    External(#[from] anyhow::Error),

    #[error("node type `{node}` is not supported by the {grammar} grammar")]
    UnsupportedNode { node: &'static str, grammar: &'static str },

    /// A template literal whose chunks and expressions do not alternate:
    /// there must be exactly one more chunk than expressions.
    #[error(
        "malformed template literal: {quasis} chunk(s) for {expressions} expression(s)"
    )]
    MalformedTemplate { quasis: usize, expressions: usize },

    #[error("node has no child at `{field}`")]
    MissingChild { field: String },

    #[error("invalid syntax tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the splice failure, the one error this crate raises on its own
    /// while formatting a template.
    pub fn is_assembly_mismatch(&self) -> bool {
        matches!(self, Error::AssemblyMismatch { .. })
    }
}
