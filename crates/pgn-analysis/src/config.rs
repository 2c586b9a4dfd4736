//! Engine and analysis configuration from environment variables

use std::env;

use crate::error::AnalysisError;

pub const DEFAULT_ENGINE_PATH: &str = "stockfish";
pub const DEFAULT_DEPTH: u32 = 18;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Path to the UCI engine binary
    pub engine_path: String,

    /// Search depth per position
    pub depth: u32,

    /// Engine `Threads` option
    pub threads: u32,

    /// Engine `Hash` option in MB
    pub hash_mb: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_path: DEFAULT_ENGINE_PATH.to_string(),
            depth: DEFAULT_DEPTH,
            threads: 1,
            hash_mb: 256,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let defaults = Self::default();

        let config = Self {
            engine_path: env::var("STOCKFISH_PATH").unwrap_or(defaults.engine_path),
            depth: parse_var("ANALYSIS_DEPTH")?.unwrap_or(defaults.depth),
            threads: parse_var("ENGINE_THREADS")?.unwrap_or(defaults.threads),
            hash_mb: parse_var("ENGINE_HASH_MB")?.unwrap_or(defaults.hash_mb),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.engine_path.trim().is_empty() {
            return Err(AnalysisError::Config("engine path is empty".into()));
        }
        if self.depth == 0 {
            return Err(AnalysisError::Config("depth must be at least 1".into()));
        }
        if self.threads == 0 {
            return Err(AnalysisError::Config("engine threads must be at least 1".into()));
        }
        if self.hash_mb == 0 {
            return Err(AnalysisError::Config("engine hash must be at least 1 MB".into()));
        }
        Ok(())
    }
}

/// Parse an optional numeric variable; set-but-invalid is an error.
fn parse_var(name: &str) -> Result<Option<u32>, AnalysisError> {
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AnalysisError::Config(format!("{name} must be a positive integer, got {v:?}"))),
        Err(_) => Ok(None),
    }
}
