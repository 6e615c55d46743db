//! Inclusion proofs: sibling paths from a leaf to an asserted root.

use bincode::{Decode, Encode};

use crate::{
    FlatMerkleError,
    concat::ByteConcat,
    hash::{HashOracle, HashValue, TreeCore},
    layout::{TreeLayout, tree_height},
};

/// Which side of the running digest a proof sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum SiblingSide {
    /// The sibling is the left child: it is concatenated before the running
    /// digest when the parent is recomputed.
    Left,
    /// The sibling is the right child: it is concatenated after the running
    /// digest.
    Right,
}

/// One level of an inclusion proof: a sibling digest and its side.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ProofStep<D> {
    /// Digest of the sibling node at this level. May be a padding copy when
    /// the proved leaf's level had odd width.
    pub sibling: D,
    /// Side the sibling is concatenated on.
    pub side: SiblingSide,
}

/// Sibling path proving one item's inclusion under a root.
///
/// `steps` runs from the leaf level upward, one step per non-root level
/// (`tree_height(leaf_count)` of them); `root` is the asserted root digest
/// the path must reproduce. The degenerate one-leaf tree proves with no
/// steps: its root is the node-salted digest of the item itself.
///
/// The proof embeds the leaf count of the tree it came from so verification
/// can pin the expected step count. Verifiers holding an externally
/// published root should compare it against `root`, and when the collection
/// size is known, check `leaf_count` too.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct InclusionProof<D> {
    /// Leaf count of the tree this proof was generated from.
    pub leaf_count: u64,
    /// Sibling steps, leaf level first.
    pub steps: Vec<ProofStep<D>>,
    /// The asserted root digest.
    pub root: D,
}

impl<D: HashValue> InclusionProof<D> {
    /// Build the proof for `data` out of a flattened tree view.
    ///
    /// `None` when the view is unbuilt or `data` is not one of its leaves.
    pub fn generate<H, C, L>(core: &TreeCore<H, C>, layout: &L, data: &[u8]) -> Option<Self>
    where
        H: HashOracle<Output = D>,
        C: ByteConcat,
        L: TreeLayout<Digest = D>,
    {
        let nodes = layout.nodes();
        let leaf_count = layout.leaf_count();
        if nodes.is_empty() || leaf_count == 0 {
            return None;
        }

        if leaf_count == 1 {
            let root = nodes.last()?;
            return (core.node_hash(&[data]) == *root).then(|| Self {
                leaf_count: 1,
                steps: Vec::new(),
                root: root.clone(),
            });
        }

        let mut index = core.find_leaf(layout, data)?;
        let height = tree_height(leaf_count as u64);
        let mut steps = Vec::with_capacity(height as usize);
        let mut start = 0;
        let mut width = leaf_count + (leaf_count & 1);
        for _ in 0..height {
            // The sibling always exists within the evened level width; it
            // may be the padding copy.
            let sibling = nodes.get(start + (index ^ 1))?.clone();
            let side = if index & 1 == 1 {
                SiblingSide::Left
            } else {
                SiblingSide::Right
            };
            steps.push(ProofStep { sibling, side });
            index >>= 1;
            start += width;
            width >>= 1;
            width += width & 1;
        }

        Some(Self {
            leaf_count: leaf_count as u64,
            steps,
            root: nodes.last()?.clone(),
        })
    }

    /// Recompute the root `data` implies under this proof's sibling path.
    ///
    /// `None` for structurally invalid shapes: a zero leaf count, a
    /// non-empty path for the one-leaf degenerate, or a step count that
    /// disagrees with `tree_height(leaf_count)`. Callers holding a
    /// published root can compare against the result directly;
    /// [`verify`](Self::verify) compares against the embedded root.
    pub fn compute_root<H, C>(&self, core: &TreeCore<H, C>, data: &[u8]) -> Option<D>
    where
        H: HashOracle<Output = D>,
        C: ByteConcat,
    {
        if self.leaf_count == 0 {
            return None;
        }
        if self.leaf_count == 1 {
            return self.steps.is_empty().then(|| core.node_hash(&[data]));
        }
        if self.steps.len() as u64 != u64::from(tree_height(self.leaf_count)) {
            return None;
        }

        let mut digest = core.leaf_hash(data);
        for step in &self.steps {
            digest = match step.side {
                SiblingSide::Left => core.node_hash(&[step.sibling.as_ref(), digest.as_ref()]),
                SiblingSide::Right => core.node_hash(&[digest.as_ref(), step.sibling.as_ref()]),
            };
        }
        Some(digest)
    }

    /// Whether `data` reproduces the embedded root under this proof.
    ///
    /// Pure recomputation with the supplied collaborators; no tree access,
    /// no panics. Malformed shapes verify as `false`.
    pub fn verify<H, C>(&self, core: &TreeCore<H, C>, data: &[u8]) -> bool
    where
        H: HashOracle<Output = D>,
        C: ByteConcat,
    {
        self.compute_root(core, data)
            .is_some_and(|digest| digest == self.root)
    }
}

impl InclusionProof<[u8; 32]> {
    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, FlatMerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| FlatMerkleError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Validates the decoded shape: the leaf count must be nonzero and the
    /// step count must match `tree_height(leaf_count)` (zero steps for the
    /// one-leaf degenerate).
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, FlatMerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 100 * 1024 * 1024 }>(); // 100MB limit
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| FlatMerkleError::InvalidProof(format!("decode error: {}", e)))?;
        if proof.leaf_count == 0 {
            return Err(FlatMerkleError::InvalidProof(
                "proof has zero leaf count".to_string(),
            ));
        }
        let expected_steps = u64::from(tree_height(proof.leaf_count));
        if proof.steps.len() as u64 != expected_steps {
            return Err(FlatMerkleError::InvalidProof(format!(
                "proof has {} steps, expected {} for leaf count {}",
                proof.steps.len(),
                expected_steps,
                proof.leaf_count
            )));
        }
        Ok(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Blake3Oracle, ExactSizeConcat, FixedSizeTree};

    fn sample_proof() -> InclusionProof<[u8; 32]> {
        let items: [&[u8]; 5] = [b"first", b"second", b"third", b"fourth", b"fifth"];
        let tree = FixedSizeTree::from_items(Blake3Oracle, ExactSizeConcat, &items)
            .expect("build five-leaf tree");
        tree.proof(b"third").expect("proof for built item")
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let proof = sample_proof();
        let bytes = proof.encode_to_vec().expect("encode proof");
        let decoded = InclusionProof::decode_from_slice(&bytes).expect("decode proof");
        assert_eq!(proof, decoded);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(
            InclusionProof::<[u8; 32]>::decode_from_slice(&[0xFF; 16]).is_err(),
            "arbitrary bytes must not decode"
        );
    }

    #[test]
    fn test_decode_rejects_zero_leaf_count() {
        let mut proof = sample_proof();
        proof.leaf_count = 0;
        proof.steps.clear();
        let bytes = proof.encode_to_vec().expect("encode");
        let err = InclusionProof::decode_from_slice(&bytes)
            .expect_err("zero leaf count must not decode");
        assert!(
            format!("{}", err).contains("zero leaf count"),
            "error should name the bad field: {}",
            err
        );
    }

    #[test]
    fn test_decode_rejects_step_count_mismatch() {
        let mut proof = sample_proof();
        proof.steps.pop();
        let bytes = proof.encode_to_vec().expect("encode");
        assert!(
            InclusionProof::decode_from_slice(&bytes).is_err(),
            "a truncated path must not decode"
        );
    }
}
