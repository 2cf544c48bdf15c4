#![forbid(unsafe_code)]
//! Build a hash chain, print it, tamper with one block and verify the result.

use clap::Parser;
use colored::*;
use hashchain::cli::{
    build_chain, build_chain_from_config, run_report, seeds_from_args, verdict, OutputFormat,
};
use hashchain::config::{load_config, TamperConfig};
use hashchain::error::ChainError;
use std::path::PathBuf;
use tracing::{warn, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transactions for the genesis block and the blocks after it.
    /// Without any, the chain is read from the config.
    payloads: Vec<String>,

    /// TOML file describing the chain (default: ./hashchain.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Nonce for the n-th payload; repeat per payload, missing ones are 0
    #[arg(short, long = "nonce", allow_negative_numbers = true)]
    nonces: Vec<i64>,

    /// Replace the transaction of block INDEX after printing the chain
    #[arg(long, num_args = 2, value_names = ["INDEX", "TRANSACTION"], allow_hyphen_values = true)]
    change: Option<Vec<String>>,

    /// Skip the tamper step, including one from the config
    #[arg(long, conflicts_with = "change")]
    no_change: bool,

    /// Treat an out-of-range --change index as an error instead of ignoring it
    #[arg(long)]
    strict: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_change(args: &[String]) -> Result<TamperConfig, ChainError> {
    match args {
        [index, transaction] => {
            let index = index.parse::<i64>().map_err(|e| {
                ChainError::ConfigError(format!("Invalid --change index '{}': {}", index, e))
            })?;
            Ok(TamperConfig {
                index,
                transaction: transaction.clone(),
            })
        }
        _ => Err(ChainError::ConfigError(
            "--change takes an index and a transaction".to_string(),
        )),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (mut chain, configured_tamper) = if cli.payloads.is_empty() {
        let config = load_config(cli.config.as_deref())?;
        (build_chain_from_config(&config), config.tamper)
    } else {
        if cli.config.is_some() {
            warn!("Payloads given on the command line; ignoring --config");
        }
        let (genesis, blocks) = seeds_from_args(&cli.payloads, &cli.nonces)?;
        (build_chain(&genesis, &blocks), None)
    };

    let tamper = match (&cli.change, cli.no_change) {
        (_, true) => None,
        (Some(args), false) => Some(parse_change(args)?),
        (None, false) => configured_tamper,
    };

    let report = run_report(&mut chain, tamper.as_ref(), cli.strict, cli.format)?;

    if cli.format == OutputFormat::Json {
        println!("{}", report.listing);
        return Ok(());
    }

    match cli.format {
        OutputFormat::Table => println!("{}", report.listing),
        _ => print!("{}", report.listing),
    }
    match report.first_invalid_block {
        None => println!("{}", verdict(true).bright_green().bold()),
        Some(index) => {
            println!("{}", verdict(false).red().bold());
            println!(
                "{}",
                format!("  First broken link at block {}", index).yellow()
            );
        }
    }

    Ok(())
}
