use crate::{Block, NodeIdentity, ProposeMessage, SignedPropose, SignedVote, ValidatorBalances, Vote};

/// The core's one seam into the outside world — network transport, cryptography,
/// validator-set lookup, the wall clock and block-body construction are all "external
/// collaborators with named interfaces" per spec. Bundling them behind a single trait
/// (rather than free functions) follows the teacher stack's `ForkChoiceStore` pattern of
/// isolating host state behind a trait object the core is generic over.
///
/// Every method here must be a pure function of its arguments (and, for the signing
/// methods, of the host's own persistent identity/keys) — the core never expects a method
/// here to consult node state it does not also see through `NodeState` itself.
pub trait ExternalContext {
    /// Stable, collision-resistant hash of a block.
    fn block_hash(&self, block: &Block) -> crate::Hash;

    /// Verifies a vote's signature against its claimed sender.
    fn verify_vote_signature(&self, vote: &SignedVote) -> bool;

    /// Validator weights for `(block_hash, slot)`. MUST be deterministic in its arguments.
    fn get_validator_set_for_slot(&self, block_hash: crate::Hash, slot: u64) -> ValidatorBalances;

    /// The validator selected to propose at `current_slot`. Deterministic per slot; the
    /// core does not define the selection function beyond that.
    fn get_proposer(&self, current_slot: u64) -> NodeIdentity;

    /// Opaque application payload for a new block.
    fn get_block_body(&self) -> Vec<u8>;

    /// Signs a vote with the host's own identity and key.
    fn sign_vote_message(&self, vote: Vote) -> SignedVote;

    /// Signs a propose message with the host's own identity and key.
    fn sign_propose_message(&self, message: ProposeMessage) -> SignedPropose;
}
