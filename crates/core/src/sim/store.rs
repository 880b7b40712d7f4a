//! Program storage interface.
//!
//! The session persists assembly programs through [`ProgramStore`]; nothing in
//! the assembler or engine knows about storage. [`MemoryStore`] is the
//! in-process implementation used by the CLI and tests.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned program identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(pub u64);

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prog-{}", self.0)
    }
}

/// A saved assembly program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Identifier assigned on save.
    pub id: ProgramId,
    /// User-facing title.
    pub title: String,
    /// Assembly source.
    pub assembly_text: String,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: u64,
    /// Last update time, seconds since the Unix epoch.
    pub updated_at: u64,
}

/// Partial update for a saved program. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New assembly source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_text: Option<String>,
}

/// Storage failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No program with this identifier exists.
    #[error("Program {0} not found")]
    NotFound(ProgramId),

    /// The backing medium failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Persistence for assembly programs.
pub trait ProgramStore {
    /// Saves a new program and returns its identifier.
    ///
    /// # Errors
    ///
    /// `StoreError::Backend` if the medium fails.
    fn save(&mut self, title: &str, assembly_text: &str) -> Result<ProgramId, StoreError>;

    /// Lists saved programs, most recently updated first.
    ///
    /// # Errors
    ///
    /// `StoreError::Backend` if the medium fails.
    fn list(&self) -> Result<Vec<Program>, StoreError>;

    /// Fetches one program.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown identifier.
    fn get(&self, id: ProgramId) -> Result<Program, StoreError>;

    /// Applies a partial update and refreshes the update time.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown identifier.
    fn update(&mut self, id: ProgramId, patch: ProgramPatch) -> Result<(), StoreError>;

    /// Removes a program.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown identifier.
    fn delete(&mut self, id: ProgramId) -> Result<(), StoreError>;
}

/// In-memory program store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    programs: BTreeMap<ProgramId, Program>,
    next_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// True when nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

impl ProgramStore for MemoryStore {
    fn save(&mut self, title: &str, assembly_text: &str) -> Result<ProgramId, StoreError> {
        self.next_id += 1;
        let id = ProgramId(self.next_id);
        let stamp = now();
        let _ = self.programs.insert(
            id,
            Program {
                id,
                title: title.to_string(),
                assembly_text: assembly_text.to_string(),
                created_at: stamp,
                updated_at: stamp,
            },
        );
        tracing::debug!(%id, title, "program saved");
        Ok(id)
    }

    fn list(&self) -> Result<Vec<Program>, StoreError> {
        let mut programs: Vec<Program> = self.programs.values().cloned().collect();
        programs.sort_by(|a, b| (b.updated_at, b.id).cmp(&(a.updated_at, a.id)));
        Ok(programs)
    }

    fn get(&self, id: ProgramId) -> Result<Program, StoreError> {
        self.programs.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn update(&mut self, id: ProgramId, patch: ProgramPatch) -> Result<(), StoreError> {
        let program = self.programs.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(title) = patch.title {
            program.title = title;
        }
        if let Some(text) = patch.assembly_text {
            program.assembly_text = text;
        }
        program.updated_at = now();
        tracing::debug!(%id, "program updated");
        Ok(())
    }

    fn delete(&mut self, id: ProgramId) -> Result<(), StoreError> {
        if self.programs.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        tracing::debug!(%id, "program deleted");
        Ok(())
    }
}
