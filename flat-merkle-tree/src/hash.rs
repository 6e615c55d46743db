//! Hash oracle seam and the salted hashing core.
//!
//! Hash domain separation:
//! - Leaves:         `H(0x00 || item)`
//! - Interior nodes: `H(0x01 || left_digest || right_digest)`
//!
//! The 0x00/0x01 domain tags prevent second-preimage attacks where a crafted
//! item could produce the same digest as an interior node.

use std::fmt::Debug;

use crate::{concat::ByteConcat, layout::TreeLayout};

/// Domain tag prepended to leaf hash inputs: `H(LEAF_DOMAIN_TAG || item)`.
pub const LEAF_DOMAIN_TAG: u8 = 0x00;
/// Domain tag prepended to interior hash inputs: `H(NODE_DOMAIN_TAG || left
/// || right)`.
pub const NODE_DOMAIN_TAG: u8 = 0x01;

/// Bounds every stored digest type satisfies: cloneable, comparable for
/// equality, viewable as bytes (for re-hashing at parent levels and hex
/// display), and debuggable.
///
/// Blanket-implemented; `[u8; 32]` and friends qualify automatically.
pub trait HashValue: Clone + Eq + AsRef<[u8]> + Debug {}

impl<T: Clone + Eq + AsRef<[u8]> + Debug> HashValue for T {}

/// A deterministic map from a contiguous byte buffer to a fixed-width
/// digest.
///
/// Oracles are injected collaborators: the tree never picks a hash
/// algorithm itself. An oracle may carry state (for example a key), but for
/// one instance equal inputs must always produce equal outputs, since the
/// build and verify paths both rely on recomputation.
pub trait HashOracle {
    /// Digest type this oracle produces.
    type Output: HashValue;

    /// Hash one contiguous buffer.
    fn hash(&self, bytes: &[u8]) -> Self::Output;
}

/// [`HashOracle`] backed by Blake3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Oracle;

impl HashOracle for Blake3Oracle {
    type Output = [u8; 32];

    fn hash(&self, bytes: &[u8]) -> [u8; 32] {
        *blake3::hash(bytes).as_bytes()
    }
}

/// The salted hashing core: a hash oracle paired with a concatenation
/// strategy.
///
/// Every digest in the system flows through here, so building, lookup, and
/// proof verification are guaranteed to salt identically. A `TreeCore` is
/// independent of any tree; a verifier holding only a published root and a
/// proof constructs one from the same collaborator pair the builder used.
#[derive(Debug, Clone)]
pub struct TreeCore<H, C> {
    oracle: H,
    concat: C,
}

impl<H: HashOracle, C: ByteConcat> TreeCore<H, C> {
    /// Pair an oracle with a concatenation strategy.
    pub fn new(oracle: H, concat: C) -> Self {
        Self { oracle, concat }
    }

    /// The hash oracle.
    pub fn oracle(&self) -> &H {
        &self.oracle
    }

    /// The concatenation strategy.
    pub fn concat(&self) -> &C {
        &self.concat
    }

    /// Domain-separated leaf digest: `H(LEAF_DOMAIN_TAG || data)`.
    pub fn leaf_hash(&self, data: &[u8]) -> H::Output {
        let tag = [LEAF_DOMAIN_TAG];
        self.oracle.hash(&self.concat.concat(&[&tag[..], data]))
    }

    /// Domain-separated interior digest: `H(NODE_DOMAIN_TAG || children…)`.
    ///
    /// For interior nodes `children` is the two child digests in
    /// left-then-right order. The degenerate one-leaf root passes the raw
    /// item as the only child.
    pub fn node_hash(&self, children: &[&[u8]]) -> H::Output {
        let tag = [NODE_DOMAIN_TAG];
        let mut parts = Vec::with_capacity(children.len() + 1);
        parts.push(&tag[..]);
        parts.extend_from_slice(children);
        self.oracle.hash(&self.concat.concat(&parts))
    }

    /// Arena index of the leaf holding `data` in `layout`, or `None` when
    /// absent.
    ///
    /// Linear scan of the leaf region (the first `leaf_count` slots); the
    /// padding slot is never searched. A one-leaf layout stores a
    /// node-salted root, so the comparison switches to
    /// [`node_hash`](Self::node_hash) there. O(N), never panics.
    pub fn find_leaf<L>(&self, layout: &L, data: &[u8]) -> Option<usize>
    where
        L: TreeLayout<Digest = H::Output>,
    {
        let nodes = layout.nodes();
        let leaf_count = layout.leaf_count();
        if nodes.is_empty() || leaf_count == 0 {
            return None;
        }
        if leaf_count == 1 {
            return (self.node_hash(&[data]) == nodes[0]).then_some(0);
        }
        let target = self.leaf_hash(data);
        nodes.get(..leaf_count)?.iter().position(|leaf| *leaf == target)
    }

    /// Whether `data` is one of the leaves of `layout`.
    pub fn contains<L>(&self, layout: &L, data: &[u8]) -> bool
    where
        L: TreeLayout<Digest = H::Output>,
    {
        self.find_leaf(layout, data).is_some()
    }
}
