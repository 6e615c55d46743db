//! The fixed-size Merkle tree: flattened arena storage plus build logic.

use crate::{
    FlatMerkleError,
    concat::ByteConcat,
    hash::{HashOracle, TreeCore},
    layout::{TreeLayout, layer_bounds, tree_height, tree_size},
    proof::InclusionProof,
};

/// Fixed-size Merkle tree over a runtime-declared number of leaves.
///
/// Storage is one contiguous arena holding every level concatenated
/// bottom-up: the `N` leaf digests first (plus a padding slot when `N` is
/// odd), then each interior level (likewise padded), the root last. A built
/// arena holds exactly [`tree_size`]`(N)` digests.
///
/// The declared leaf count is fixed for the lifetime of the instance.
/// [`build`](Self::build) fills or fully overwrites the arena and rejects
/// collections of any other length. All reads take `&self`, so a built tree
/// can be shared freely across threads; the type is `Send + Sync` whenever
/// its collaborators are.
#[derive(Debug, Clone)]
pub struct FixedSizeTree<H: HashOracle, C: ByteConcat> {
    core: TreeCore<H, C>,
    leaf_count: usize,
    nodes: Vec<H::Output>,
}

impl<H: HashOracle, C: ByteConcat> FixedSizeTree<H, C> {
    /// Create an empty tree for exactly `leaf_count` items.
    ///
    /// Nothing is allocated until [`build`](Self::build).
    pub fn new(oracle: H, concat: C, leaf_count: usize) -> Self {
        Self {
            core: TreeCore::new(oracle, concat),
            leaf_count,
            nodes: Vec::new(),
        }
    }

    /// Create a tree over `items` and build it in one step.
    pub fn from_items<T: AsRef<[u8]>>(
        oracle: H,
        concat: C,
        items: &[T],
    ) -> Result<Self, FlatMerkleError> {
        let mut tree = Self::new(oracle, concat, items.len());
        tree.build(items)?;
        Ok(tree)
    }

    /// Hash `items` into the arena, fully overwriting any previous build.
    ///
    /// `items` must contain exactly the declared leaf count; any other
    /// length is rejected with [`FlatMerkleError::LeafCountMismatch`]
    /// before storage is touched, so a previous build stays intact.
    ///
    /// One allocation and O(N) oracle invocations. A level of odd width has
    /// its last digest copied (not re-hashed) into a padding slot so every
    /// parent has two children; a single item is node-salted directly into
    /// the root slot and an empty collection stores nothing.
    pub fn build<T: AsRef<[u8]>>(&mut self, items: &[T]) -> Result<(), FlatMerkleError> {
        if items.len() != self.leaf_count {
            return Err(FlatMerkleError::LeafCountMismatch {
                expected: self.leaf_count,
                actual: items.len(),
            });
        }

        if self.leaf_count == 0 {
            self.nodes.clear();
            return Ok(());
        }

        let total = tree_size(self.leaf_count as u64) as usize;
        let mut nodes = Vec::with_capacity(total);

        if self.leaf_count == 1 {
            // Degenerate tree: the single item is hashed with the node salt
            // and stored as the root directly, bypassing the leaf salt.
            nodes.push(self.core.node_hash(&[items[0].as_ref()]));
            self.nodes = nodes;
            return Ok(());
        }

        for item in items {
            nodes.push(self.core.leaf_hash(item.as_ref()));
        }

        let mut start = 0;
        let mut width = self.leaf_count;
        while width > 1 {
            if width & 1 == 1 {
                let last = nodes[start + width - 1].clone();
                nodes.push(last);
                width += 1;
            }
            for pair in 0..width / 2 {
                let left = start + 2 * pair;
                let digest = self
                    .core
                    .node_hash(&[nodes[left].as_ref(), nodes[left + 1].as_ref()]);
                nodes.push(digest);
            }
            start += width;
            width /= 2;
        }

        debug_assert_eq!(nodes.len(), total);
        self.nodes = nodes;
        Ok(())
    }

    /// Declared number of leaves `N`.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of levels above the leaf level ([`tree_height`]`(N)`).
    pub fn height(&self) -> u32 {
        tree_height(self.leaf_count as u64)
    }

    /// Closed-form arena size for the declared leaf count
    /// ([`tree_size`]`(N)`).
    ///
    /// Reported even before a build; the zero-leaf degenerate keeps a
    /// closed form of 1 although nothing is ever stored for it.
    pub fn node_count(&self) -> u64 {
        tree_size(self.leaf_count as u64)
    }

    /// True until [`build`](Self::build) succeeds, and always for a
    /// zero-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The whole arena: leaves first, root last. Empty until built.
    pub fn nodes(&self) -> &[H::Output] {
        &self.nodes
    }

    /// The root digest (last arena slot); `None` until built.
    pub fn root(&self) -> Option<&H::Output> {
        self.nodes.last()
    }

    /// Hex rendering of the root digest; `None` until built.
    pub fn root_hex(&self) -> Option<String> {
        self.root().map(|digest| hex::encode(digest.as_ref()))
    }

    /// Arena bounds `(start, len)` of level `layer` (0 = root,
    /// [`height`](Self::height) = leaves).
    ///
    /// Pure arithmetic over the declared leaf count, available before a
    /// build. `None` out of range or for a zero-leaf tree.
    pub fn layer_bounds(&self, layer: u32) -> Option<(u64, u64)> {
        layer_bounds(self.leaf_count as u64, layer)
    }

    /// The digests of level `layer` (0 = root, [`height`](Self::height) =
    /// leaves).
    ///
    /// Widths match the stored arena: every level except the root reports
    /// its evened width, padding slot included. `None` out of range or
    /// until built.
    pub fn layer(&self, layer: u32) -> Option<&[H::Output]> {
        let (start, len) = self.layer_bounds(layer)?;
        self.nodes.get(start as usize..(start + len) as usize)
    }

    /// Arena index of the leaf holding `data`, or `None` when absent.
    ///
    /// Linear scan of the leaf region; the padding slot is never searched.
    pub fn find_leaf(&self, data: &[u8]) -> Option<usize> {
        self.core.find_leaf(self, data)
    }

    /// Whether `data` was one of the built items.
    pub fn contains(&self, data: &[u8]) -> bool {
        self.core.contains(self, data)
    }

    /// Generate an inclusion proof for `data`.
    ///
    /// `None` when `data` is not one of the built items or the tree is
    /// unbuilt.
    pub fn proof(&self, data: &[u8]) -> Option<InclusionProof<H::Output>> {
        InclusionProof::generate(&self.core, self, data)
    }

    /// Check `proof` against `data` using this tree's collaborators.
    ///
    /// Purely recomputes; the arena is not read. Equivalent to
    /// `proof.verify(tree.core(), data)`.
    pub fn verify_proof(&self, data: &[u8], proof: &InclusionProof<H::Output>) -> bool {
        proof.verify(&self.core, data)
    }

    /// The salted hashing core used by this tree.
    ///
    /// Hand it to [`InclusionProof::verify`] to check proofs without the
    /// tree.
    pub fn core(&self) -> &TreeCore<H, C> {
        &self.core
    }
}

impl<H: HashOracle, C: ByteConcat> TreeLayout for FixedSizeTree<H, C> {
    type Digest = H::Output;

    fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    fn nodes(&self) -> &[H::Output] {
        &self.nodes
    }
}
