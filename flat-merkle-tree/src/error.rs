use thiserror::Error;

/// Errors from fixed-size Merkle tree operations.
///
/// Absence is never an error: lookups return `Option`/`bool` sentinels and
/// proof verification returns `false`. Errors are reserved for rejected
/// builds and malformed proof bytes.
#[derive(Debug, Error)]
pub enum FlatMerkleError {
    /// The collection handed to `build` does not have the declared length.
    #[error("leaf count mismatch: tree expects {expected} items, got {actual}")]
    LeafCountMismatch {
        /// Leaf count the tree was created for.
        expected: usize,
        /// Length of the rejected collection.
        actual: usize,
    },
    /// Proof bytes failed to decode, or decoded into an inconsistent shape.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
