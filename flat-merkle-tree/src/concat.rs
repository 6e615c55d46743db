//! Byte concatenation strategies.
//!
//! Every hash input in this crate is the concatenation of an ordered list of
//! byte parts (a domain tag, then the payload). [`ByteConcat`] is the seam
//! that produces that buffer; the two implementations trade an extra length
//! pass for exact allocation.

/// Builds one contiguous buffer out of an ordered list of byte parts.
///
/// Implementations must reproduce the logical concatenation exactly: output
/// length equals the sum of the part lengths, order is preserved, and empty
/// parts contribute nothing. Since the output is identical across
/// implementations, trees and proofs built with different strategies are
/// interchangeable.
pub trait ByteConcat {
    /// Concatenate `parts` in order into a single buffer.
    fn concat(&self, parts: &[&[u8]]) -> Vec<u8>;
}

/// Concatenation with an exact upfront allocation.
///
/// Sums the part lengths first and reserves once, so the copy pass can
/// never reallocate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSizeConcat;

impl ByteConcat for ExactSizeConcat {
    fn concat(&self, parts: &[&[u8]]) -> Vec<u8> {
        let total: usize = parts.iter().map(|part| part.len()).sum();
        let mut buf = Vec::with_capacity(total);
        for part in parts {
            buf.extend_from_slice(part);
        }
        buf
    }
}

/// Concatenation by plain accumulation.
///
/// Appends each part to a growing buffer and lets `Vec` manage capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccumulatingConcat;

impl ByteConcat for AccumulatingConcat {
    fn concat(&self, parts: &[&[u8]]) -> Vec<u8> {
        let mut buf = Vec::new();
        for part in parts {
            buf.extend_from_slice(part);
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_preserves_order_and_bytes() {
        let parts: [&[u8]; 3] = [b"ab", b"", b"cde"];
        assert_eq!(ExactSizeConcat.concat(&parts), b"abcde".to_vec());
        assert_eq!(AccumulatingConcat.concat(&parts), b"abcde".to_vec());
    }

    #[test]
    fn test_strategies_are_interchangeable() {
        let parts: [&[u8]; 4] = [b"", b"x", b"yz", b"tail bytes"];
        assert_eq!(
            ExactSizeConcat.concat(&parts),
            AccumulatingConcat.concat(&parts),
            "both strategies must produce identical buffers"
        );
    }

    #[test]
    fn test_concat_of_nothing_is_empty() {
        let parts: [&[u8]; 0] = [];
        assert!(ExactSizeConcat.concat(&parts).is_empty());
        assert!(AccumulatingConcat.concat(&parts).is_empty());
    }

    #[test]
    fn test_concat_length_is_sum_of_part_lengths() {
        let parts: [&[u8]; 3] = [b"12345", b"", b"678"];
        assert_eq!(ExactSizeConcat.concat(&parts).len(), 8);
        assert_eq!(AccumulatingConcat.concat(&parts).len(), 8);
    }
}
