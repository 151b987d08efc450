use crate::{Hash, SignedVote};
use serde_derive::{Deserialize, Serialize};
use std::collections::HashSet;

/// A block in the chain DAG.
///
/// `body` is an opaque payload; the core never constructs or interprets it
/// (`ExternalContext::get_block_body` is the only producer). `votes` are the votes the
/// proposer chose to embed — re-ingested into `view_votes` by `execute_view_merge` so that
/// evidence survives even if the original vote message was never gossiped to every peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub parent_hash: Hash,
    pub slot: u64,
    pub body: Vec<u8>,
    pub votes: HashSet<SignedVote>,
}

impl Block {
    /// Builds the genesis block: no parent, slot zero, no embedded votes.
    pub fn genesis(body: Vec<u8>) -> Self {
        Self {
            parent_hash: Hash::zero(),
            slot: 0,
            body,
            votes: HashSet::new(),
        }
    }
}
