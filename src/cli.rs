//! CLI utilities shared by the `hashchain` binary
//!
//! Builds demo chains from a [`Config`] or from command-line payloads,
//! applies tamper steps and renders the console report.

use crate::blockchain::{Block, Blockchain};
use crate::config::{BlockSeed, Config, TamperConfig};
use crate::crypto::short_hash;
use crate::error::{ChainError, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Report format for the chain dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
}

/// Builds a chain from the genesis seed and appends the rest in order, each
/// linked to the tail before it.
pub fn build_chain(genesis: &BlockSeed, blocks: &[BlockSeed]) -> Blockchain {
    let mut chain = Blockchain::new(Block::genesis(genesis.transaction.as_str(), genesis.nonce));
    for seed in blocks {
        chain.add_block(seed.transaction.as_str(), seed.nonce);
    }
    info!(blocks = chain.len(), "Built chain");
    chain
}

pub fn build_chain_from_config(config: &Config) -> Blockchain {
    build_chain(&config.genesis, &config.blocks)
}

/// Pairs payloads with nonces; payloads without a nonce get 0.
///
/// The first payload becomes genesis.
pub fn seeds_from_args(payloads: &[String], nonces: &[i64]) -> Result<(BlockSeed, Vec<BlockSeed>)> {
    if nonces.len() > payloads.len() {
        return Err(ChainError::ConfigError(format!(
            "{} nonces given for {} payloads",
            nonces.len(),
            payloads.len()
        )));
    }

    let mut seeds = payloads
        .iter()
        .enumerate()
        .map(|(i, p)| BlockSeed::new(p.as_str(), nonces.get(i).copied().unwrap_or(0)));
    let genesis = seeds.next().ok_or(ChainError::EmptyChain)?;
    Ok((genesis, seeds.collect()))
}

/// Applies a tamper step with a signed index.
///
/// Negative and past-the-end indices leave the chain untouched and return
/// `Ok(false)`, unless `strict` is set, in which case they are an error.
pub fn apply_tamper(chain: &mut Blockchain, tamper: &TamperConfig, strict: bool) -> Result<bool> {
    let index = match usize::try_from(tamper.index) {
        Ok(index) => index,
        Err(_) if strict => return Err(ChainError::NegativeIndex(tamper.index)),
        Err(_) => {
            debug!(index = tamper.index, "Ignoring change to negative block index");
            return Ok(false);
        }
    };

    if strict {
        chain.try_change_block(index, tamper.transaction.as_str())?;
        Ok(true)
    } else {
        Ok(chain.change_block(index, tamper.transaction.as_str()))
    }
}

/// Human-readable verdict line.
pub fn verdict(valid: bool) -> &'static str {
    if valid {
        "Blockchain is valid."
    } else {
        "Blockchain is not valid."
    }
}

/// Renders every block as a table row, in chain order.
pub fn render_table(chain: &Blockchain) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("Block"),
            Cell::new("Transaction"),
            Cell::new("Nonce"),
            Cell::new("Previous Hash"),
            Cell::new("Current Hash"),
        ]);

    for (i, block) in chain.into_iter().enumerate() {
        let previous = if block.is_genesis() {
            "-".to_string()
        } else {
            short_hash(&block.previous_hash)
        };
        table.add_row(vec![
            Cell::new(i),
            Cell::new(&block.transaction),
            Cell::new(block.nonce),
            Cell::new(previous),
            Cell::new(short_hash(&block.hash)),
        ]);
    }

    table.to_string()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    blocks: &'a [Block],
    valid: bool,
    first_invalid_block: Option<usize>,
}

/// Chain plus verdict as pretty-printed JSON.
pub fn render_json(chain: &Blockchain) -> Result<String> {
    let first_invalid_block = chain.first_invalid_block();
    let report = JsonReport {
        blocks: &chain.blocks,
        valid: first_invalid_block.is_none(),
        first_invalid_block,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Result of a demo run: the chain as it was before the tamper step, and the
/// verification outcome after it.
#[derive(Debug, Clone)]
pub struct Report {
    pub format: OutputFormat,
    pub listing: String,
    pub tamper_applied: Option<bool>,
    pub first_invalid_block: Option<usize>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.first_invalid_block.is_none()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.format == OutputFormat::Json {
            return writeln!(f, "{}", self.listing);
        }
        write!(f, "{}", self.listing)?;
        if self.format == OutputFormat::Table {
            writeln!(f)?;
        }
        writeln!(f, "{}", verdict(self.is_valid()))?;
        if let Some(index) = self.first_invalid_block {
            writeln!(f, "  First broken link at block {}", index)?;
        }
        Ok(())
    }
}

/// Runs the demo sequence: render the chain, apply the tamper step, verify.
///
/// Text and table listings show the chain before tampering; the JSON listing
/// is rendered after it, together with the verdict.
pub fn run_report(
    chain: &mut Blockchain,
    tamper: Option<&TamperConfig>,
    strict: bool,
    format: OutputFormat,
) -> Result<Report> {
    let mut listing = match format {
        OutputFormat::Text => chain.to_string(),
        OutputFormat::Table => render_table(chain),
        OutputFormat::Json => String::new(),
    };

    let tamper_applied = match tamper {
        Some(tamper) => {
            let applied = apply_tamper(chain, tamper, strict)?;
            if applied {
                info!(index = tamper.index, "Tampered with block");
            } else {
                warn!(index = tamper.index, "No block at index; chain left unchanged");
            }
            Some(applied)
        }
        None => None,
    };

    if format == OutputFormat::Json {
        listing = render_json(chain)?;
    }

    Ok(Report {
        format,
        listing,
        tamper_applied,
        first_invalid_block: chain.first_invalid_block(),
    })
}
