//! Pipeline stage implementations.
//!
//! Each function performs the work of one transition of the resident
//! instruction and places it in the next stage of `next.pipeline`:
//! 1. **Fetch:** Idle → Fetch. Reads the instruction at `pc / 4` and advances the PC.
//! 2. **Decode:** Fetch → Decode. Derives control signals and operand fields.
//! 3. **Execute:** Decode → Execute. Runs the ALU, sets flags for `CMP`, computes
//!    the data address. Execute → Memory resolves branches.
//! 4. **Memory:** Memory → WriteBack. Performs the load or store.
//! 5. **Writeback:** WriteBack → idle. Commits the result to the register file.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation (ALU and branch resolution).
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point.
pub use decode::decode_stage;
/// Execute stage entry points.
pub use execute::{branch_stage, execute_stage};
/// Fetch stage entry point.
pub use fetch::fetch_stage;
/// Memory stage entry point.
pub use memory::mem_stage;
/// Writeback stage entry point.
pub use writeback::wb_stage;
