//! # Unit Components
//!
//! Organizes the per-component test suites: assembler, instruction set,
//! pipeline core, session, configuration, and statistics.

/// Assembler tests: label pass, diagnostics, and parse properties.
pub mod asm;





/// Statistics collected by the session.
pub mod stats;
