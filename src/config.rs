//! Host configuration read from the environment.
//!
//! - `POCKET_TETRIS_SEED`: RNG seed (u32, default: derived from the clock)
//! - `POCKET_TETRIS_TICK_MS`: frame period in milliseconds (default: 16)
//! - `POCKET_TETRIS_LOG_PATH`: append-only JSONL event log (default: disabled)

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::TICK_MS;

pub const SEED_VAR: &str = "POCKET_TETRIS_SEED";
pub const TICK_MS_VAR: &str = "POCKET_TETRIS_TICK_MS";
pub const LOG_PATH_VAR: &str = "POCKET_TETRIS_LOG_PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("POCKET_TETRIS_TICK_MS must be greater than zero")]
    ZeroTick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub seed: u32,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from any variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match get(SEED_VAR) {
            Some(v) => parse_u32(SEED_VAR, v)?,
            None => clock_seed(),
        };

        let tick_ms = match get(TICK_MS_VAR) {
            Some(v) => parse_u32(TICK_MS_VAR, v)?,
            None => TICK_MS,
        };
        if tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        let log_path = get(LOG_PATH_VAR).map(PathBuf::from);

        Ok(Self {
            seed,
            tick_ms,
            log_path,
        })
    }
}

fn parse_u32(var: &'static str, value: String) -> Result<u32, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
