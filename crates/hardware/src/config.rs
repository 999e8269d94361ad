//! Configuration for the APEX simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline machine parameters (register count, memory size, code base).
//! 2. **Structures:** Sections for general options, data memory, and the pipeline.
//! 3. **Loading:** JSON deserialization from strings or files, with validation.
//!
//! Every field is optional in JSON; missing fields take the values in `defaults`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants;
use crate::common::error::{Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Address of the first instruction.
    pub const CODE_BASE: i32 = constants::CODE_BASE;

    /// Number of architectural registers.
    pub const NUM_REGISTERS: usize = constants::NUM_REGISTERS;

    /// Number of data memory words.
    pub const DATA_MEMORY_SIZE: usize = constants::DATA_MEMORY_SIZE;

    /// Forwarding is on unless explicitly disabled.
    pub const FORWARDING: bool = true;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use apex_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true },
///     "pipeline": { "forwarding": false }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace);
/// assert!(!config.pipeline.forwarding);
/// assert_eq!(config.memory.data_memory_size, 4096);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline behavior
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigFormat`] for malformed JSON and
    /// [`SimError::InvalidConfig`] when a value fails validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that the configured machine can be built.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.general.num_registers == 0 {
            return Err(SimError::InvalidConfig(
                "general.num_registers must be at least 1".to_string(),
            ));
        }
        if self.memory.data_memory_size == 0 {
            return Err(SimError::InvalidConfig(
                "memory.data_memory_size must be at least 1".to_string(),
            ));
        }
        if self.general.code_base < 0 || self.general.code_base % constants::INSTRUCTION_SIZE != 0
        {
            return Err(SimError::InvalidConfig(format!(
                "general.code_base {} must be non-negative and a multiple of {}",
                self.general.code_base,
                constants::INSTRUCTION_SIZE
            )));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Print each stage's instruction to stderr every cycle.
    #[serde(default)]
    pub trace: bool,

    /// Address of the first instruction; also the reset program counter.
    #[serde(default = "GeneralConfig::default_code_base")]
    pub code_base: i32,

    /// Number of architectural registers.
    #[serde(default = "GeneralConfig::default_num_registers")]
    pub num_registers: usize,
}

impl GeneralConfig {
    const fn default_code_base() -> i32 {
        defaults::CODE_BASE
    }

    const fn default_num_registers() -> usize {
        defaults::NUM_REGISTERS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            code_base: defaults::CODE_BASE,
            num_registers: defaults::NUM_REGISTERS,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Number of 32-bit words; addresses index words directly.
    #[serde(default = "MemoryConfig::default_data_memory_size")]
    pub data_memory_size: usize,
}

impl MemoryConfig {
    const fn default_data_memory_size() -> usize {
        defaults::DATA_MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_memory_size: defaults::DATA_MEMORY_SIZE,
        }
    }
}

/// Pipeline behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Supply in-flight results to decode instead of stalling until writeback.
    #[serde(default = "PipelineConfig::default_forwarding")]
    pub forwarding: bool,
}

impl PipelineConfig {
    const fn default_forwarding() -> bool {
        defaults::FORWARDING
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forwarding: defaults::FORWARDING,
        }
    }
}
