//! Minimal in-memory `ExternalContext` stub shared across this crate's tests: deterministic
//! hashing, no-op signature verification, a fixed validator set — analogous to the teacher's
//! `BeaconChainHarness` test-utils pattern (SPEC_FULL §8).

use std::collections::HashMap;
use types::{Block, ExternalContext, Hash, NodeIdentity, ProposeMessage, SignedPropose, SignedVote, ValidatorBalances, Vote};

pub struct TestContext {
    pub balances: ValidatorBalances,
}

impl TestContext {
    pub fn with_validators(weights: impl IntoIterator<Item = (NodeIdentity, u64)>) -> Self {
        let balances: HashMap<_, _> = weights.into_iter().collect();
        Self { balances }
    }
}

impl ExternalContext for TestContext {
    fn block_hash(&self, block: &Block) -> Hash {
        if block.parent_hash.is_zero() && block.slot == 0 {
            return Hash::from_low_u64(0);
        }
        let mut bytes = block.parent_hash.0;
        bytes[0] ^= block.slot as u8;
        bytes[1] ^= 0x5a;
        Hash(bytes)
    }

    fn verify_vote_signature(&self, _vote: &SignedVote) -> bool {
        true
    }

    fn get_validator_set_for_slot(&self, _block_hash: Hash, _slot: u64) -> ValidatorBalances {
        self.balances.clone()
    }

    fn get_proposer(&self, current_slot: u64) -> NodeIdentity {
        NodeIdentity(current_slot % self.balances.len().max(1) as u64)
    }

    fn get_block_body(&self) -> Vec<u8> {
        Vec::new()
    }

    fn sign_vote_message(&self, vote: Vote) -> SignedVote {
        SignedVote {
            message: vote,
            signature: types::Signature(Vec::new()),
            sender: NodeIdentity(0),
        }
    }

    fn sign_propose_message(&self, message: ProposeMessage) -> SignedPropose {
        SignedPropose {
            message,
            signature: types::Signature(Vec::new()),
        }
    }
}
