//! Fixed-size Merkle tree with flattened bottom-up storage using Blake3.
//!
//! The tree is built over a fixed number of leaves and keeps every level in
//! one contiguous arena: the (evened) leaf level first, then each interior
//! level, with the root in the last slot. A level of odd width is evened by
//! duplicating its last node before pairing, so every parent hashes exactly
//! two children. Hashing is salted with a one-byte domain tag to keep leaf
//! and interior preimages apart:
//!
//! - leaf: `blake3(0x00 || item)`
//! - interior node: `blake3(0x01 || left || right)`
//! - single-leaf root: `blake3(0x01 || item)`
//!
//! Hashing and byte concatenation are pluggable through [`HashOracle`] and
//! [`ByteConcat`]; [`Blake3Oracle`] with [`ExactSizeConcat`] is the stock
//! pairing. Inclusion proofs record one sibling per level together with the
//! side it joins on, and verify against the embedded root without access to
//! the arena.

#![warn(missing_docs)]

pub(crate) mod concat;
mod error;
pub(crate) mod hash;
pub(crate) mod layout;
mod proof;
mod tree;

#[cfg(test)]
pub(crate) mod test_utils;

pub use concat::{AccumulatingConcat, ByteConcat, ExactSizeConcat};
pub use error::FlatMerkleError;
pub use hash::{Blake3Oracle, HashOracle, HashValue, LEAF_DOMAIN_TAG, NODE_DOMAIN_TAG, TreeCore};
pub use layout::{TreeLayout, layer_bounds, tree_height, tree_size};
pub use proof::{InclusionProof, ProofStep, SiblingSide};
pub use tree::FixedSizeTree;
