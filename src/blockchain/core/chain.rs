use crate::blockchain::core::validation::{find_first_invalid, verify_genesis};
use crate::crypto::calculate_hash;
use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

pub const GENESIS_TRANSACTION: &str = "Genesis Block";
pub const GENESIS_NONCE: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub transaction: String,
    pub nonce: i64,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    /// Builds a block and seals it with its commitment.
    ///
    /// The hash is computed here exactly once; nothing recomputes it
    /// implicitly afterwards.
    pub fn new(transaction: impl Into<String>, nonce: i64, previous_hash: impl Into<String>) -> Self {
        let transaction = transaction.into();
        let previous_hash = previous_hash.into();
        let hash = calculate_hash(&transaction, nonce, &previous_hash);

        Block {
            transaction,
            nonce,
            previous_hash,
            hash,
        }
    }

    /// A block with no predecessor.
    pub fn genesis(transaction: impl Into<String>, nonce: i64) -> Self {
        Self::new(transaction, nonce, "")
    }

    /// Recomputes the commitment from the block's current fields.
    pub fn calculate_hash(&self) -> String {
        calculate_hash(&self.transaction, self.nonce, &self.previous_hash)
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_empty()
    }
}

/// An ordered, append-only sequence of blocks. Insertion order is chain order.
///
/// None of the operations are synchronized; share it behind a lock if it has
/// to be reached from more than one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blockchain {
    pub blocks: Vec<Block>,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new(Block::genesis(GENESIS_TRANSACTION, GENESIS_NONCE))
    }
}

impl Blockchain {
    /// Create a new `Blockchain` holding only `genesis`.
    pub fn new(genesis: Block) -> Self {
        debug!(hash = %genesis.hash, "Created chain from genesis block");
        Blockchain {
            blocks: vec![genesis],
        }
    }

    /// Appends a caller-built block. Linkage to the tail is not checked.
    pub fn push_block(&mut self, block: Block) {
        debug!(index = self.blocks.len(), hash = %block.hash, "Appending block");
        self.blocks.push(block);
    }

    /// Builds a block linked to the current tail and appends it.
    pub fn add_block(&mut self, transaction: impl Into<String>, nonce: i64) -> &Block {
        let previous_hash = self
            .blocks
            .last()
            .map(|b| b.hash.clone())
            .unwrap_or_default();
        self.push_block(Block::new(transaction, nonce, previous_hash));
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Replaces the transaction of the block at `index` and re-seals that
    /// block's hash with its existing nonce and previous hash.
    ///
    /// Out-of-range indices are ignored and `false` is returned. Later blocks
    /// are never touched, so the successor keeps pointing at the old hash.
    pub fn change_block(&mut self, index: usize, transaction: impl Into<String>) -> bool {
        let len = self.blocks.len();
        let Some(block) = self.blocks.get_mut(index) else {
            debug!(index, len, "Ignoring change to non-existent block");
            return false;
        };

        block.transaction = transaction.into();
        block.hash = block.calculate_hash();
        debug!(index, hash = %block.hash, "Changed block transaction");
        true
    }

    /// Like [`Blockchain::change_block`], but an out-of-range index is an error.
    pub fn try_change_block(
        &mut self,
        index: usize,
        transaction: impl Into<String>,
    ) -> Result<(), ChainError> {
        if self.change_block(index, transaction) {
            Ok(())
        } else {
            Err(ChainError::IndexOutOfBounds {
                index,
                len: self.blocks.len(),
            })
        }
    }

    /// Returns true if every block after genesis is sealed against its
    /// predecessor's hash. The genesis block itself is not checked.
    pub fn verify_chain(&self) -> bool {
        self.first_invalid_block().is_none()
    }

    /// Index of the first block whose link fails, scanning from index 1.
    pub fn first_invalid_block(&self) -> Option<usize> {
        let invalid = find_first_invalid(&self.blocks);
        if let Some(index) = invalid {
            warn!(index, "Chain verification failed");
        }
        invalid
    }

    /// Checks that genesis has an empty previous hash and a matching commitment.
    pub fn verify_genesis(&self) -> bool {
        verify_genesis(&self.blocks)
    }

    /// Prints every block to stdout in chain order.
    pub fn display_blocks(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            writeln!(f, "Block {}:", i)?;
            writeln!(f, "  Transaction: {}", block.transaction)?;
            writeln!(f, "  Nonce: {}", block.nonce)?;
            writeln!(f, "  Previous Hash: {}", block.previous_hash)?;
            writeln!(f, "  Current Hash: {}", block.hash)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Blockchain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
