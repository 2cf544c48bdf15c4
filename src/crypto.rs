//! Commitment function for hashchain blocks

use sha2::{Digest, Sha256};

/// Length of a rendered commitment: 32 bytes of SHA-256 as hex.
pub const HASH_HEX_LEN: usize = 64;

/// Computes the commitment of a block from its payload, nonce and the
/// predecessor's commitment.
///
/// The preimage is the payload, the decimal nonce and the previous hash
/// concatenated without delimiters. The layout is fixed; changing it would
/// invalidate every commitment produced so far.
pub fn calculate_hash(transaction: &str, nonce: i64, previous_hash: &str) -> String {
    let data = format!("{}{}{}", transaction, nonce, previous_hash);
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns true if `s` has the shape of a commitment (64 lowercase hex digits).
pub fn is_valid_hash(s: &str) -> bool {
    s.len() == HASH_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Shortens a commitment for narrow displays, e.g. `8500b59b...8a8f9394`.
///
/// Counts characters, not bytes, so hand-built blocks holding arbitrary
/// text in their hash fields still render.
pub fn short_hash(hash: &str) -> String {
    let len = hash.chars().count();
    if len > 20 {
        let head: String = hash.chars().take(8).collect();
        let tail: String = hash.chars().skip(len - 8).collect();
        format!("{}...{}", head, tail)
    } else {
        hash.to_string()
    }
}
