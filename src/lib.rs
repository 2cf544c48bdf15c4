//! hashchain - a minimal hash-chained ledger
//!
//! Each block's hash commits to its transaction, its nonce and the hash of
//! the block before it, so rewriting history is detectable by recomputing
//! the links. Changing a block re-seals that block's own hash; only the
//! successor's stale `previous_hash` gives the change away.
//!
//! # Architecture
//!
//! ## Core Chain
//! - [`blockchain`] - Block and chain structures, mutation and verification
//!
//! ## Cryptography
//! - [`crypto`] - Commitment function (SHA-256)
//!
//! ## Configuration & Utilities
//! - [`config`] - Demo chain configuration (TOML)
//! - [`error`] - Error types
//! - [`cli`] - CLI utilities

#![forbid(unsafe_code)]

// ============================================================================
// Core Chain
// ============================================================================
pub mod blockchain;

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;
