//! Condition flags.
//!
//! Only `CMP` updates flags, and only N and Z are computed. C and V hold their
//! previous value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Condition flags register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flags {
    /// Negative.
    #[serde(rename = "N")]
    pub n: bool,
    /// Zero.
    #[serde(rename = "Z")]
    pub z: bool,
    /// Carry. Not computed by this subset.
    #[serde(rename = "C")]
    pub c: bool,
    /// Overflow. Not computed by this subset.
    #[serde(rename = "V")]
    pub v: bool,
}

impl Flags {
    /// Sets N and Z from a comparison result, leaving C and V unchanged.
    pub const fn set_nz(&mut self, result: i32) {
        self.n = result < 0;
        self.z = result == 0;
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            bit(self.n, 'N'),
            bit(self.z, 'Z'),
            bit(self.c, 'C'),
            bit(self.v, 'V')
        )
    }
}
