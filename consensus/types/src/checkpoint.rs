use crate::Hash;
use serde_derive::{Deserialize, Serialize};

/// Names a finalization candidate: the block it refers to, the slot at which it is being
/// voted on (`chkp_slot`), and the slot the block itself was proposed in (`block_slot`).
///
/// Two checkpoints with the same `block_hash` but different `chkp_slot` are distinct —
/// `chkp_slot` is part of the identity, not metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Checkpoint {
    pub block_hash: Hash,
    pub chkp_slot: u64,
    pub block_slot: u64,
}

impl Checkpoint {
    pub fn new(block_hash: Hash, chkp_slot: u64, block_slot: u64) -> Self {
        Self {
            block_hash,
            chkp_slot,
            block_slot,
        }
    }
}
