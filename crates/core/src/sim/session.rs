//! Simulation session.
//!
//! A `Session` is the run loop around [`advance`]. It re-assembles whenever the
//! source changes, refuses to step a program with diagnostics, and keeps the
//! previous CPU states so a step can be undone or the run exported.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::SimError;
use super::store::{ProgramId, ProgramPatch, ProgramStore, StoreError};
use crate::asm::{Assembler, AssemblyResult};
use crate::config::Config;
use crate::core::CpuState;
use crate::core::pipeline::advance;
use crate::core::pipeline::latches::StageName;
use crate::core::units::Bru;
use crate::stats::SimStats;

/// One recorded state, as exported by [`Session::export_history`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Clock value of the state.
    pub step: u64,
    /// The state itself.
    pub state: CpuState,
}

/// Why [`Session::run`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The pipeline is idle and the program counter is past the program.
    Halted,
    /// The cycle budget ran out first.
    CycleLimit,
}

/// Run loop state for one program.
#[derive(Debug)]
pub struct Session {
    config: Config,
    assembler: Assembler,
    source: String,
    program: AssemblyResult,
    state: CpuState,
    history: VecDeque<(CpuState, SimStats)>,
    stats: SimStats,
    program_id: Option<ProgramId>,
}

impl Session {
    /// Creates a session with an empty program.
    pub fn new(config: Config) -> Self {
        Self {
            assembler: Assembler::new(&config.assembler),
            source: String::new(),
            program: AssemblyResult::default(),
            state: CpuState::new(&config.cpu),
            history: VecDeque::new(),
            stats: SimStats::default(),
            program_id: None,
            config,
        }
    }

    /// Replaces the program text, re-assembles it, and resets the CPU.
    pub fn load_source(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.program = self.assembler.parse(&self.source);
        if !self.program.is_ok() {
            tracing::warn!(errors = self.program.errors.len(), "program has assembly errors");
        }
        self.reset();
    }

    /// Returns the CPU to its reset state and clears history and statistics.
    pub fn reset(&mut self) {
        self.state = CpuState::new(&self.config.cpu);
        self.history.clear();
        self.stats = SimStats::default();
    }

    /// Advances one cycle.
    ///
    /// # Errors
    ///
    /// `SimError::ProgramHasErrors` while the program has diagnostics;
    /// `SimError::Pipeline` if the engine fails, in which case the state is unchanged.
    pub fn step(&mut self) -> Result<&CpuState, SimError> {
        if !self.program.is_ok() {
            return Err(SimError::ProgramHasErrors {
                count: self.program.errors.len(),
            });
        }

        let next = advance(&self.state, &self.program.instructions)?;
        let stats = self.stats.clone();
        self.observe(&next);

        let prev = std::mem::replace(&mut self.state, next);
        self.history.push_back((prev, stats));
        if self.history.len() > self.config.session.history_limit {
            let _ = self.history.pop_front();
        }
        Ok(&self.state)
    }

    /// Steps until the program halts or `max_cycles` cycles have run.
    ///
    /// # Errors
    ///
    /// Any error from [`Session::step`].
    pub fn run(&mut self, max_cycles: u64) -> Result<StopReason, SimError> {
        for _ in 0..max_cycles {
            if self.is_halted() {
                return Ok(StopReason::Halted);
            }
            let _ = self.step()?;
        }
        if self.is_halted() {
            Ok(StopReason::Halted)
        } else {
            tracing::warn!(max_cycles, pc = self.state.pc, "cycle limit reached");
            Ok(StopReason::CycleLimit)
        }
    }

    /// Restores the previous state and its statistics. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some((prev, stats)) => {
                self.state = prev;
                self.stats = stats;
                true
            }
            None => false,
        }
    }

    /// True when further steps can only advance the clock.
    pub fn is_halted(&self) -> bool {
        self.state.is_halted(&self.program.instructions)
    }

    /// Serializes recorded history plus the current state as a JSON array of
    /// [`Snapshot`]s, oldest first.
    ///
    /// # Errors
    ///
    /// `SimError::Serialize` if encoding fails.
    pub fn export_history(&self) -> Result<String, SimError> {
        let snapshots: Vec<Snapshot> = self
            .history()
            .chain(std::iter::once(&self.state))
            .map(|state| Snapshot {
                step: state.clock,
                state: state.clone(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&snapshots)?)
    }

    /// Saves the current source. The first save creates a program; later
    /// saves update it. If the saved program has since disappeared from the
    /// store, a new one is created.
    ///
    /// # Errors
    ///
    /// `SimError::Store` if the store fails.
    pub fn save(&mut self, store: &mut dyn ProgramStore, title: &str) -> Result<ProgramId, SimError> {
        if let Some(id) = self.program_id {
            let patch = ProgramPatch {
                title: Some(title.to_string()),
                assembly_text: Some(self.source.clone()),
            };
            match store.update(id, patch) {
                Ok(()) => return Ok(id),
                Err(StoreError::NotFound(_)) => {
                    tracing::warn!(%id, "saved program is gone, saving a new copy");
                    self.program_id = None;
                }
                Err(e) => return Err(e.into()),
            }
        }
        let id = store.save(title, &self.source)?;
        self.program_id = Some(id);
        Ok(id)
    }

    /// Deletes a saved program. If it is the session's own program, the next
    /// [`Session::save`] creates a new one.
    ///
    /// # Errors
    ///
    /// `SimError::Store` if the store fails.
    pub fn delete(&mut self, store: &mut dyn ProgramStore, id: ProgramId) -> Result<(), SimError> {
        store.delete(id)?;
        if self.program_id == Some(id) {
            self.program_id = None;
        }
        Ok(())
    }

    /// Loads a saved program and resets the CPU.
    ///
    /// # Errors
    ///
    /// `SimError::Store` if the program cannot be fetched.
    pub fn open(&mut self, store: &dyn ProgramStore, id: ProgramId) -> Result<(), SimError> {
        let program = store.get(id)?;
        self.load_source(program.assembly_text);
        self.program_id = Some(id);
        Ok(())
    }

    /// Current CPU state.
    pub const fn state(&self) -> &CpuState {
        &self.state
    }

    /// Current program text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Output of the last assembly.
    pub const fn program(&self) -> &AssemblyResult {
        &self.program
    }

    /// Recorded past states, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &CpuState> {
        self.history.iter().map(|(state, _)| state)
    }

    /// Run statistics since the last reset.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Identifier of the saved program, once saved or opened.
    pub const fn program_id(&self) -> Option<ProgramId> {
        self.program_id
    }

    fn observe(&mut self, next: &CpuState) {
        self.stats.cycles += 1;
        match self.state.pipeline.resident() {
            Some((StageName::WriteBack, stage)) => {
                if let Some(inst) = &stage.instruction {
                    self.stats.record_retire(inst.opcode);
                }
            }
            Some((StageName::Execute, stage)) => {
                if let Some(inst) = stage.instruction.as_ref().filter(|i| i.opcode.is_branch()) {
                    let taken = Bru::taken(inst.opcode, &self.state.flags);
                    tracing::trace!(line = inst.line, taken, target = next.pc, "branch resolved");
                    self.stats.record_branch(taken);
                }
            }
            _ => {}
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
