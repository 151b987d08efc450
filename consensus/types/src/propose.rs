use crate::{Block, Signature, SignedVote};
use serde_derive::{Deserialize, Serialize};

/// A proposer's unsigned announcement: the new block plus the "proposer view" — extra
/// votes the proposer has seen that are not embedded in the block itself, shared so
/// recipients can fold them into their own `view_votes` ahead of the next `MERGE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposeMessage {
    pub block: Block,
    pub proposer_view: Vec<SignedVote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPropose {
    pub message: ProposeMessage,
    pub signature: Signature,
}
