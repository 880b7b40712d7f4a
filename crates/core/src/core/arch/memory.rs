//! Sparse data memory.
//!
//! Maps byte addresses to 32-bit values. Addresses never written read as zero;
//! reading is never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sparse word store keyed by byte address.
///
/// Addresses are not checked for word alignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memory {
    words: BTreeMap<u32, i32>,
}

impl Memory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the value at `addr`, or zero if it was never written.
    pub fn read(&self, addr: u32) -> i32 {
        self.words.get(&addr).copied().unwrap_or(0)
    }

    /// Writes `val` at `addr`.
    pub fn write(&mut self, addr: u32, val: i32) {
        let _ = self.words.insert(addr, val);
    }

    /// Iterates over written addresses in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        self.words.iter().map(|(a, v)| (*a, *v))
    }

    /// Number of written addresses.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<(u32, i32)> for Memory {
    fn from_iter<T: IntoIterator<Item = (u32, i32)>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}
