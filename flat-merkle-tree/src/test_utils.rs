//! Test utilities: a hash oracle wrapper that counts invocations.

use std::cell::Cell;

use crate::{Blake3Oracle, HashOracle};

/// Blake3 oracle that counts how many times `hash` runs.
///
/// Interior mutability keeps the shared receiver of `HashOracle`, matching
/// how trees hold their oracle.
#[derive(Debug, Default)]
pub(crate) struct CountingOracle {
    inner: Blake3Oracle,
    calls: Cell<u64>,
}

impl CountingOracle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of `hash` invocations so far.
    pub(crate) fn calls(&self) -> u64 {
        self.calls.get()
    }
}

impl HashOracle for CountingOracle {
    type Output = [u8; 32];

    fn hash(&self, bytes: &[u8]) -> [u8; 32] {
        self.calls.set(self.calls.get() + 1);
        self.inner.hash(bytes)
    }
}
