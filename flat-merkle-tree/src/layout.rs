//! Arena geometry: closed-form size/height arithmetic and the read-only
//! layout view.
//!
//! A built tree stores every level in one contiguous arena, leaves first
//! and root last. Levels of odd width carry one extra padding slot (a copy
//! of their last digest) so that every parent has two children; the root
//! level alone is never padded. All functions here are pure arithmetic over
//! the declared leaf count.

use crate::hash::HashValue;

/// Read-only view of a flattened fixed-size Merkle tree.
///
/// The engine reads tree geometry through this trait (lookup, proof
/// generation) instead of through any concrete tree type, so alternative
/// arenas can plug in by implementing two accessors.
pub trait TreeLayout {
    /// Digest type stored in the arena.
    type Digest: HashValue;

    /// Declared number of leaves `N`, fixed for the lifetime of the tree.
    fn leaf_count(&self) -> usize;

    /// Flattened node storage: every level concatenated leaves-first, root
    /// last, padding slots included. Empty until built.
    fn nodes(&self) -> &[Self::Digest];
}

/// Total number of digest slots a built tree over `leaf_count` leaves
/// occupies, padding slots and root included.
///
/// Every level is rounded up to an even width before its parents are
/// counted, so the closed form is 1 for `N <= 1` (a lone root slot) and
/// `even(N) + even(N/2) + … + 1` otherwise.
///
/// # Safety (arithmetic)
///
/// Overflows when `leaf_count >= 2^63`; real arenas are bounded far below
/// that by memory.
pub fn tree_size(leaf_count: u64) -> u64 {
    let mut size = 1;
    let mut width = leaf_count;
    while width > 1 {
        width += width & 1;
        size += width;
        width >>= 1;
    }
    size
}

/// Number of levels above the leaf level: 0 for zero or one leaf, otherwise
/// `ceil(log2(leaf_count))`.
pub fn tree_height(leaf_count: u64) -> u32 {
    match leaf_count {
        0 | 1 => 0,
        n => n.ilog2() + u32::from(!n.is_power_of_two()),
    }
}

/// Arena bounds `(start, len)` of one level.
///
/// `layer` counts from the root: layer 0 is the root, layer
/// `tree_height(leaf_count)` is the leaf level. Every reported width except
/// the root's is evened (padding slot included), matching the stored arena.
/// `None` when `leaf_count` is zero or `layer` exceeds the height.
///
/// O(height): walks the level widths from the leaves upward, accumulating
/// offsets.
pub fn layer_bounds(leaf_count: u64, layer: u32) -> Option<(u64, u64)> {
    if leaf_count == 0 {
        return None;
    }
    let height = tree_height(leaf_count);
    if layer > height {
        return None;
    }

    let mut start = 0;
    let mut width = leaf_count + (leaf_count & 1);
    for _ in 0..height - layer {
        start += width;
        width >>= 1;
        width += width & 1;
    }
    if layer == 0 {
        // The root level is a single slot; its width is never evened.
        width = 1;
    }
    Some((start, width))
}
