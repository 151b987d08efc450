use crate::ChainStore;
use std::collections::{HashMap, HashSet};
use types::{ExternalContext, Hash, NodeIdentity, SignedVote};

/// Composable predicates and filters over a vote set, each a pure function of
/// `(ChainStore, ExternalContext, votes)`. These mirror the teacher's `OperationVerifier`
/// style: small, independently testable passes that compose into the pipeline `get_head`
/// needs, rather than one monolithic filter function.
pub struct VoteFilters;

impl VoteFilters {
    /// `head_hash` known with a complete chain, sender carries weight at `(head, vote.slot)`
    /// (looked up fresh per vote, since each vote names its own head), signature verifies,
    /// and the FFG link is well formed: `ffg_source` ancestor of `ffg_target` ancestor of
    /// `head`, `ffg_source.chkp_slot < ffg_target.chkp_slot`, and both checkpoint block
    /// hashes resolve with matching `block_slot`.
    pub fn is_valid(store: &ChainStore, ctx: &dyn ExternalContext, vote: &SignedVote) -> bool {
        if !ctx.verify_vote_signature(vote) {
            return false;
        }
        let msg = &vote.message;
        if !store.has(msg.head_hash) || !store.is_complete_chain(msg.head_hash) {
            return false;
        }
        let balances = ctx.get_validator_set_for_slot(msg.head_hash, msg.slot);
        if !balances.contains_key(&vote.sender) {
            return false;
        }
        if msg.ffg_source.chkp_slot >= msg.ffg_target.chkp_slot {
            return false;
        }
        let source_block = match store.get(msg.ffg_source.block_hash) {
            Some(b) => b,
            None => return false,
        };
        if source_block.slot != msg.ffg_source.block_slot {
            return false;
        }
        let target_block = match store.get(msg.ffg_target.block_hash) {
            Some(b) => b,
            None => return false,
        };
        if target_block.slot != msg.ffg_target.block_slot {
            return false;
        }
        if !store.is_ancestor_descendant(msg.ffg_source.block_hash, msg.ffg_target.block_hash) {
            return false;
        }
        if !store.is_ancestor_descendant(msg.ffg_target.block_hash, msg.head_hash) {
            return false;
        }
        true
    }

    pub fn retain_valid(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
    ) -> HashSet<SignedVote> {
        votes
            .iter()
            .filter(|v| Self::is_valid(store, ctx, v))
            .cloned()
            .collect()
    }

    /// `vote.slot + eta < current_slot`.
    pub fn is_expired(vote: &SignedVote, current_slot: u64, eta: u64) -> bool {
        vote.message.slot + eta < current_slot
    }

    /// Retains non-expired votes. Per SPEC_FULL §9, the source's `filter_out_expired` variant
    /// that retained expired votes is a bug; this keeps the complement.
    pub fn retain_non_expired(
        votes: &HashSet<SignedVote>,
        current_slot: u64,
        eta: u64,
    ) -> HashSet<SignedVote> {
        votes
            .iter()
            .filter(|v| !Self::is_expired(v, current_slot, eta))
            .cloned()
            .collect()
    }

    /// True iff another vote in `votes` shares `(sender, slot)` but a different `head_hash`.
    pub fn is_equivocating(vote: &SignedVote, votes: &HashSet<SignedVote>) -> bool {
        votes.iter().any(|other| {
            other.sender_slot() == vote.sender_slot() && other.message.head_hash != vote.message.head_hash
        })
    }

    /// Drops every sender that has cast two or more votes for distinct heads at the same slot.
    pub fn retain_non_equivocating(votes: &HashSet<SignedVote>) -> HashSet<SignedVote> {
        let mut heads_per_sender_slot: HashMap<(NodeIdentity, u64), HashSet<Hash>> = HashMap::new();
        for v in votes {
            heads_per_sender_slot
                .entry(v.sender_slot())
                .or_insert_with(HashSet::new)
                .insert(v.message.head_hash);
        }
        votes
            .iter()
            .filter(|v| heads_per_sender_slot[&v.sender_slot()].len() == 1)
            .cloned()
            .collect()
    }

    /// Per sender, retain only the vote with the largest `slot` (Latest-Message-Driven).
    pub fn lmd_reduce(votes: &HashSet<SignedVote>) -> HashSet<SignedVote> {
        let mut latest: HashMap<NodeIdentity, &SignedVote> = HashMap::new();
        for v in votes {
            latest
                .entry(v.sender)
                .and_modify(|current| {
                    if v.message.slot > current.message.slot {
                        *current = v;
                    }
                })
                .or_insert(v);
        }
        latest.into_values().cloned().collect()
    }

    /// `head_hash` resolves to a strict-or-equal descendant of `block`.
    pub fn retain_descendant_of(
        store: &ChainStore,
        votes: &HashSet<SignedVote>,
        block: Hash,
    ) -> HashSet<SignedVote> {
        votes
            .iter()
            .filter(|v| store.is_ancestor_descendant(block, v.message.head_hash))
            .cloned()
            .collect()
    }

    /// `head_hash` resolves to a strict-or-equal ancestor of `head`.
    pub fn retain_in_chain_of(
        store: &ChainStore,
        votes: &HashSet<SignedVote>,
        head: Hash,
    ) -> HashSet<SignedVote> {
        votes
            .iter()
            .filter(|v| store.is_ancestor_descendant(v.message.head_hash, head))
            .cloned()
            .collect()
    }

    /// The pipeline `get_head` runs before GHOST descent: invalid → equivocating → expired →
    /// LMD → descendant-of(from).
    pub fn ghost_candidate_votes(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
        current_slot: u64,
        eta: u64,
        from: Hash,
    ) -> HashSet<SignedVote> {
        let valid = Self::retain_valid(store, ctx, votes);
        let non_equivocating = Self::retain_non_equivocating(&valid);
        let fresh = Self::retain_non_expired(&non_equivocating, current_slot, eta);
        let reduced = Self::lmd_reduce(&fresh);
        Self::retain_descendant_of(store, &reduced, from)
    }
}
