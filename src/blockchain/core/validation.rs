use crate::blockchain::core::chain::Block;
use crate::crypto::calculate_hash;

/// Scans the links of `blocks` in ascending order and returns the index of
/// the first block whose stored hash does not match the hash recomputed
/// against its predecessor's stored hash.
///
/// Index 0 is never checked: it has no predecessor to be validated against.
pub fn find_first_invalid(blocks: &[Block]) -> Option<usize> {
    blocks
        .windows(2)
        .position(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            current.hash != calculate_hash(&current.transaction, current.nonce, &previous.hash)
        })
        .map(|offset| offset + 1)
}

/// Checks the genesis block against the empty previous-hash sentinel.
///
/// An empty slice has no genesis and fails.
pub fn verify_genesis(blocks: &[Block]) -> bool {
    match blocks.first() {
        Some(genesis) => {
            genesis.previous_hash.is_empty()
                && genesis.hash == calculate_hash(&genesis.transaction, genesis.nonce, "")
        }
        None => false,
    }
}
