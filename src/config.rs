//! Configuration management for hashchain
//!
//! A config file describes a demonstration chain: the genesis block, the
//! blocks appended after it and an optional tamper step. `Config::default()`
//! reproduces the classic three-block sample including its tamper step; a
//! file only tampers when it has a `[tamper]` table.

use crate::blockchain::{GENESIS_NONCE, GENESIS_TRANSACTION};
use crate::error::{ChainError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "hashchain.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub genesis: BlockSeed,
    #[serde(default = "default_blocks")]
    pub blocks: Vec<BlockSeed>,
    /// Absent from a file means no tamper step.
    #[serde(default)]
    pub tamper: Option<TamperConfig>,
}

/// Payload and nonce of a block to be built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockSeed {
    pub transaction: String,
    #[serde(default)]
    pub nonce: i64,
}

/// A change applied to the chain after it has been displayed.
///
/// `index` is signed so that negative indices can be expressed; they are
/// treated like any other out-of-range index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TamperConfig {
    pub index: i64,
    pub transaction: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genesis: BlockSeed::default(),
            blocks: default_blocks(),
            tamper: default_tamper(),
        }
    }
}

impl Default for BlockSeed {
    fn default() -> Self {
        Self {
            transaction: GENESIS_TRANSACTION.to_string(),
            nonce: GENESIS_NONCE,
        }
    }
}

impl BlockSeed {
    pub fn new(transaction: impl Into<String>, nonce: i64) -> Self {
        Self {
            transaction: transaction.into(),
            nonce,
        }
    }
}

fn default_blocks() -> Vec<BlockSeed> {
    vec![
        BlockSeed::new("Alice to Bob", 123),
        BlockSeed::new("Bob to Carol", 456),
    ]
}

fn default_tamper() -> Option<TamperConfig> {
    Some(TamperConfig {
        index: 1,
        transaction: "New Transaction Data".to_string(),
    })
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.genesis.transaction.is_empty() {
            return Err(ChainError::ConfigError(
                "genesis.transaction must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads the demo configuration.
///
/// An explicit `path` must exist. Without one, `hashchain.toml` in the
/// working directory is used if present, otherwise the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    if !required && !path.exists() {
        debug!("No {} found, using built-in sample chain", DEFAULT_CONFIG_FILE);
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)?;
    let config = Config::from_toml_str(&config_str)?;
    info!(
        path = %path.display(),
        blocks = config.blocks.len() + 1,
        "Loaded chain configuration"
    );
    Ok(config)
}
