use crate::{Checkpoint, Hash, NodeIdentity, Signature};
use serde_derive::{Deserialize, Serialize};

/// The unsigned content of a vote: a GHOST head choice bundled with an FFG link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Vote {
    pub slot: u64,
    pub head_hash: Hash,
    pub ffg_source: Checkpoint,
    pub ffg_target: Checkpoint,
}

/// A `Vote` bundled with its sender and signature. This is the unit the core admits into
/// `view_votes`/`buffer_votes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedVote {
    pub message: Vote,
    pub signature: Signature,
    pub sender: NodeIdentity,
}

impl SignedVote {
    /// `(sender, slot)` is the key equivocation and LMD-reduction are keyed on.
    pub fn sender_slot(&self) -> (NodeIdentity, u64) {
        (self.sender, self.message.slot)
    }
}
