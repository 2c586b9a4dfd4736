use std::env;

use pgn_analysis::{AnalysisError, EngineConfig};

use crate::cache::DEFAULT_CAPACITY;

/// Shallowest and deepest search a request may ask for.
pub const MIN_DEPTH: u32 = 8;
pub const MAX_DEPTH: u32 = 24;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Most analyses kept in memory at once
    pub cache_entries: usize,
    /// Engine path and default depth; the path is never taken from requests
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AnalysisError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
            cache_entries: env::var("CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            engine: EngineConfig::from_env()?,
        })
    }
}
