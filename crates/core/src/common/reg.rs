//! Architectural Registers.
//!
//! This module provides the register naming surface and the `RegisterFile` that
//! holds one signed 32-bit value per register. It provides:
//! 1. **Naming:** The fixed, case-sensitive names `R0..R7`, `PC`, `LR`, `SP`.
//! 2. **Storage:** A dense array indexed by register, serialized as a name-to-value map.
//! 3. **Observability:** A `Display` implementation for register dumps.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Number of architectural registers.
pub const REGISTER_COUNT: usize = 11;

/// An architectural register name.
///
/// Parsing is exact and case-sensitive: `"R3"` and `"SP"` parse, `"r3"` and
/// `"R8"` do not.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Register {
    /// General-purpose register 0.
    R0,
    /// General-purpose register 1.
    R1,
    /// General-purpose register 2.
    R2,
    /// General-purpose register 3.
    R3,
    /// General-purpose register 4.
    R4,
    /// General-purpose register 5.
    R5,
    /// General-purpose register 6.
    R6,
    /// General-purpose register 7.
    R7,
    /// Program counter. Never written by WriteBack.
    #[serde(rename = "PC")]
    #[strum(serialize = "PC")]
    Pc,
    /// Link register.
    #[serde(rename = "LR")]
    #[strum(serialize = "LR")]
    Lr,
    /// Stack pointer.
    #[serde(rename = "SP")]
    #[strum(serialize = "SP")]
    Sp,
}

impl Register {
    /// Position of this register in the register file.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parses an exact register name, returning `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

/// Register file holding one wrapping 32-bit value per architectural register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<Register, i32>", from = "BTreeMap<Register, i32>")]
pub struct RegisterFile {
    regs: [i32; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
        }
    }

    /// Creates the reset register file: all zero except `SP`.
    ///
    /// # Arguments
    ///
    /// * `sp` - Initial stack pointer value.
    pub const fn with_stack_pointer(sp: i32) -> Self {
        let mut regs = [0; REGISTER_COUNT];
        regs[Register::Sp.index()] = sp;
        Self { regs }
    }

    /// Reads the value of a register.
    pub const fn read(&self, reg: Register) -> i32 {
        self.regs[reg.index()]
    }

    /// Writes a value to a register.
    pub const fn write(&mut self, reg: Register, val: i32) {
        self.regs[reg.index()] = val;
    }

    /// Iterates over `(register, value)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, i32)> + '_ {
        Register::iter().map(|reg| (reg, self.read(reg)))
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RegisterFile> for BTreeMap<Register, i32> {
    fn from(file: RegisterFile) -> Self {
        file.iter().collect()
    }
}

impl From<BTreeMap<Register, i32>> for RegisterFile {
    /// Registers missing from the map read as zero.
    fn from(map: BTreeMap<Register, i32>) -> Self {
        let mut file = Self::new();
        for (reg, val) in map {
            file.write(reg, val);
        }
        file
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (reg, val)) in self.iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                writeln!(f)?;
            }
            let name: &'static str = reg.into();
            write!(f, "{name:>3}={val:<11}")?;
        }
        Ok(())
    }
}
