//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulation. It provides:
//! 1. **Defaults:** Reset values and policy defaults.
//! 2. **Structures:** Hierarchical config for general, CPU, assembler, and session settings.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Program counter after reset.
    pub const START_PC: u32 = constants::RESET_PC;

    /// Stack pointer after reset.
    pub const INITIAL_SP: i32 = constants::RESET_STACK_POINTER;

    /// Cycle budget for run-to-completion loops.
    ///
    /// Bounds programs that branch forever.
    pub const MAX_CYCLES: u64 = 100_000;

    /// Number of past CPU states a session keeps for undo and replay.
    pub const HISTORY_LIMIT: usize = 10_000;

    /// Delay between automatic steps in play mode, in milliseconds.
    pub const PLAY_INTERVAL_MS: u64 = 800;
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file `{path}`")]
    Read {
        /// Path as given.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid configuration JSON.
    #[error("Invalid config JSON")]
    Parse(#[from] serde_json::Error),
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use armpipe_core::config::Config;
///
/// let json = r#"{
///     "cpu": { "initial_sp": 4096 },
///     "assembler": { "allow_label_redefinition": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cpu.initial_sp, 4096);
/// assert_eq!(config.cpu.start_pc, 0);
/// assert!(config.assembler.allow_label_redefinition);
/// assert_eq!(config.general.max_cycles, 100_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// CPU reset state
    #[serde(default)]
    pub cpu: CpuConfig,
    /// Assembler policy
    #[serde(default)]
    pub assembler: AssemblerConfig,
    /// Run-loop settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` on malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// `ConfigError::Read` if the file cannot be read, `ConfigError::Parse`
    /// if its contents are not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage trace events.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Cycle budget for `Session::run`.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// CPU reset state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuConfig {
    /// Program counter after reset (byte address).
    #[serde(default = "CpuConfig::default_start_pc")]
    pub start_pc: u32,

    /// Stack pointer after reset.
    #[serde(default = "CpuConfig::default_initial_sp")]
    pub initial_sp: i32,
}

impl CpuConfig {
    const fn default_start_pc() -> u32 {
        defaults::START_PC
    }

    const fn default_initial_sp() -> i32 {
        defaults::INITIAL_SP
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            start_pc: defaults::START_PC,
            initial_sp: defaults::INITIAL_SP,
        }
    }
}

/// Assembler policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblerConfig {
    /// Accept a second definition of a label, replacing the first, instead of
    /// reporting it.
    #[serde(default)]
    pub allow_label_redefinition: bool,
}

/// Run-loop settings used by the session and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Past states kept for undo; the oldest is dropped beyond this.
    #[serde(default = "SessionConfig::default_history_limit")]
    pub history_limit: usize,

    /// Delay between automatic steps in play mode, in milliseconds.
    #[serde(default = "SessionConfig::default_play_interval_ms")]
    pub play_interval_ms: u64,
}

impl SessionConfig {
    const fn default_history_limit() -> usize {
        defaults::HISTORY_LIMIT
    }

    const fn default_play_interval_ms() -> u64 {
        defaults::PLAY_INTERVAL_MS
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: defaults::HISTORY_LIMIT,
            play_interval_ms: defaults::PLAY_INTERVAL_MS,
        }
    }
}
