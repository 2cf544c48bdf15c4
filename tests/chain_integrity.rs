//! Integration tests for building, tampering with and verifying a chain

use hashchain::blockchain::{Block, Blockchain};
use hashchain::cli::{apply_tamper, build_chain_from_config, run_report, OutputFormat};
use hashchain::config::{load_config, Config, TamperConfig};
use hashchain::crypto::{calculate_hash, is_valid_hash};
use hashchain::error::ChainError;
use tempfile::TempDir;

/// Helper to build the three-block sample chain by hand
fn three_block_chain() -> Blockchain {
    let genesis = Block::new("Genesis Block", 0, "");
    let mut chain = Blockchain::new(genesis);

    let alice = Block::new("Alice to Bob", 123, chain.blocks[0].hash.clone());
    chain.push_block(alice);
    let bob = Block::new("Bob to Carol", 456, chain.blocks[1].hash.clone());
    chain.push_block(bob);

    chain
}

#[test]
fn test_genesis_commitment() {
    let genesis = Block::new("Genesis Block", 0, "");
    assert_eq!(genesis.hash, calculate_hash("Genesis Block", 0, ""));
    assert!(is_valid_hash(&genesis.hash));
}

#[test]
fn test_fresh_chain_is_valid() {
    let chain = three_block_chain();
    assert!(chain.verify_chain());
    assert_eq!(chain, build_chain_from_config(&Config::default()));
}

#[test]
fn test_tamper_detected_at_successor() {
    let mut chain = three_block_chain();
    let old_hash = chain.blocks[1].hash.clone();

    chain.change_block(1, "New Transaction Data");

    // Block 1 re-sealed itself...
    assert_eq!(
        chain.blocks[1].hash,
        calculate_hash("New Transaction Data", 123, &chain.blocks[0].hash)
    );
    // ...but block 2 still points at the old hash.
    assert_eq!(chain.blocks[2].previous_hash, old_hash);
    assert!(!chain.verify_chain());
    assert_eq!(chain.first_invalid_block(), Some(2));
}

#[test]
fn test_tampering_with_tail_goes_unnoticed() {
    let mut chain = three_block_chain();
    let last = chain.len() - 1;
    chain.change_block(last, "x");
    assert!(chain.verify_chain());
}

#[test]
fn test_out_of_range_changes_leave_chain_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = three_block_chain();
    let before = chain.clone();

    for index in [-1, chain.len() as i64, i64::MAX] {
        let tamper = TamperConfig {
            index,
            transaction: "x".to_string(),
        };
        assert!(!apply_tamper(&mut chain, &tamper, false)?);
    }

    assert_eq!(chain, before);
    assert!(chain.verify_chain());
    Ok(())
}

#[test]
fn test_strict_change_surfaces_error() {
    let mut chain = three_block_chain();
    let result = chain.try_change_block(10, "x");
    assert!(matches!(
        result,
        Err(ChainError::IndexOutOfBounds { index: 10, len: 3 })
    ));
}

#[test]
fn test_single_block_chain_is_valid() {
    let chain = Blockchain::new(Block::genesis("Only", 42));
    assert!(chain.verify_chain());
    assert_eq!(chain.first_invalid_block(), None);
}

#[test]
fn test_forged_genesis_only_caught_by_genesis_check() {
    let mut chain = three_block_chain();
    chain.blocks[0].transaction = "Forged".to_string();

    assert!(chain.verify_chain());
    assert!(!chain.verify_genesis());
}

#[test]
fn test_chain_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("hashchain.toml");
    std::fs::write(
        &path,
        r#"
[genesis]
transaction = "Ledger Start"
nonce = 1

[[blocks]]
transaction = "Carol to Dave"
nonce = 2

[[blocks]]
transaction = "Dave to Erin"
nonce = 3

[[blocks]]
transaction = "Erin to Frank"
nonce = 4

[tamper]
index = 2
transaction = "Dave to Mallory"
"#,
    )?;

    let config = load_config(Some(path.as_path()))?;
    let mut chain = build_chain_from_config(&config);
    assert_eq!(chain.len(), 4);
    assert!(chain.verify_chain());

    let tamper = config.tamper.ok_or("tamper step missing")?;
    assert!(apply_tamper(&mut chain, &tamper, true)?);
    assert_eq!(chain.first_invalid_block(), Some(3));
    Ok(())
}

#[test]
fn test_config_file_without_tamper_leaves_chain_intact() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("hashchain.toml");
    std::fs::write(
        &path,
        r#"
[genesis]
transaction = "Ledger Start"

[[blocks]]
transaction = "Carol to Dave"
nonce = 2
"#,
    )?;

    let config = load_config(Some(path.as_path()))?;
    assert!(config.tamper.is_none());

    let mut chain = build_chain_from_config(&config);
    let before = chain.clone();
    let report = run_report(&mut chain, config.tamper.as_ref(), false, OutputFormat::Text)?;

    assert_eq!(chain, before);
    assert_eq!(report.tamper_applied, None);
    assert!(report.is_valid());
    Ok(())
}
