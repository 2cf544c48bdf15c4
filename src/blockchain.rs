// Thin re-export module: the chain lives in `blockchain/core.rs`, split into
// the data structure itself and the verification scans over it.

pub mod core;
pub use core::*;
