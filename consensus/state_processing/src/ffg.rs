use fork_choice::{ChainStore, VoteFilters};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use types::{Checkpoint, ExternalContext, NodeIdentity, SignedVote};

/// FFG justification/finalization cascade: the safety half of the protocol, layered on
/// `fork_choice`'s `ChainStore`/`VoteFilters` the way the teacher's `per_epoch_processing`
/// sits on `fork_choice`'s `ProtoArray`.
pub struct Ffg;

/// Justification is recursive over `ffg_source`; memoize per top-level call since
/// `ffg_source.chkp_slot < ffg_target.chkp_slot` strictly decreases and the same checkpoint
/// can be revisited from multiple branches.
type JustificationMemo = RefCell<HashMap<Checkpoint, bool>>;

impl Ffg {
    /// Votes in `votes` whose FFG link exactly matches `(src, tgt)`.
    pub fn votes_for_ffg_link<'a>(
        votes: &'a HashSet<SignedVote>,
        src: Checkpoint,
        tgt: Checkpoint,
    ) -> Vec<&'a SignedVote> {
        votes
            .iter()
            .filter(|v| v.message.ffg_source == src && v.message.ffg_target == tgt)
            .collect()
    }

    /// Distinct-sender weight behind `(src, tgt)` reaches a ⅔ supermajority of
    /// `total_weight(balances)`.
    pub fn is_link_supermajority(
        votes: &HashSet<SignedVote>,
        src: Checkpoint,
        tgt: Checkpoint,
        balances: &types::ValidatorBalances,
    ) -> bool {
        let senders: HashSet<NodeIdentity> = Self::votes_for_ffg_link(votes, src, tgt)
            .into_iter()
            .map(|v| v.sender)
            .collect();
        let support: u64 = senders.iter().filter_map(|s| balances.get(s)).sum();
        3 * support >= 2 * types::total_weight(balances)
    }

    /// `genesis_checkpoint` is justified and finalized unconditionally (spec invariant 4).
    pub fn is_justified_checkpoint(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
        genesis_checkpoint: Checkpoint,
        checkpoint: Checkpoint,
    ) -> bool {
        let memo = JustificationMemo::default();
        Self::is_justified_memo(store, ctx, votes, genesis_checkpoint, checkpoint, &memo)
    }

    fn is_justified_memo(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
        genesis_checkpoint: Checkpoint,
        checkpoint: Checkpoint,
        memo: &JustificationMemo,
    ) -> bool {
        if checkpoint == genesis_checkpoint {
            return true;
        }
        if let Some(&cached) = memo.borrow().get(&checkpoint) {
            return cached;
        }
        // Placeholder breaks the only possible cycle: a checkpoint can only be reached while
        // resolving itself through a vote whose source strictly precedes it in chkp_slot, so
        // this path is never actually taken, but guards against malformed input regardless.
        memo.borrow_mut().insert(checkpoint, false);

        let result = if !store.has(checkpoint.block_hash) || !store.is_complete_chain(checkpoint.block_hash) {
            false
        } else {
            let balances = ctx.get_validator_set_for_slot(checkpoint.block_hash, checkpoint.block_slot);
            let supporting: HashSet<SignedVote> = votes
                .iter()
                .filter(|v| {
                    Self::is_ffg_vote_in_support_of(
                        store,
                        ctx,
                        votes,
                        genesis_checkpoint,
                        v,
                        checkpoint,
                        memo,
                    )
                })
                .cloned()
                .collect();
            let senders: HashSet<NodeIdentity> = supporting.iter().map(|v| v.sender).collect();
            let support: u64 = senders.iter().filter_map(|s| balances.get(s)).sum();
            3 * support >= 2 * types::total_weight(&balances)
        };

        memo.borrow_mut().insert(checkpoint, result);
        result
    }

    /// `v` is valid, targets `C` at the same `chkp_slot`, `C`'s block is an ancestor of the
    /// vote's target block, `v.ffg_source`'s block is an ancestor of `C`'s block, and
    /// `v.ffg_source` is itself justified.
    #[allow(clippy::too_many_arguments)]
    fn is_ffg_vote_in_support_of(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
        genesis_checkpoint: Checkpoint,
        vote: &SignedVote,
        checkpoint: Checkpoint,
        memo: &JustificationMemo,
    ) -> bool {
        if !VoteFilters::is_valid(store, ctx, vote) {
            return false;
        }
        if vote.message.ffg_target.chkp_slot != checkpoint.chkp_slot {
            return false;
        }
        if !store.is_ancestor_descendant(checkpoint.block_hash, vote.message.ffg_target.block_hash) {
            return false;
        }
        if !store.is_ancestor_descendant(vote.message.ffg_source.block_hash, checkpoint.block_hash) {
            return false;
        }
        Self::is_justified_memo(store, ctx, votes, genesis_checkpoint, vote.message.ffg_source, memo)
    }

    /// Every FFG target appearing in `votes` that is justified, plus genesis.
    pub fn justified_checkpoints(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
        genesis_checkpoint: Checkpoint,
    ) -> HashSet<Checkpoint> {
        let memo = JustificationMemo::default();
        let mut out = HashSet::new();
        out.insert(genesis_checkpoint);
        for v in votes {
            let target = v.message.ffg_target;
            if Self::is_justified_memo(store, ctx, votes, genesis_checkpoint, target, &memo) {
                out.insert(target);
            }
        }
        out
    }

    /// Justified checkpoint with the greatest `chkp_slot`; ties broken on the
    /// lexicographically smallest `block_hash` for a stable result.
    pub fn highest_justified_checkpoint(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
        genesis_checkpoint: Checkpoint,
    ) -> Checkpoint {
        Self::justified_checkpoints(store, ctx, votes, genesis_checkpoint)
            .into_iter()
            .max_by(|a, b| {
                a.chkp_slot
                    .cmp(&b.chkp_slot)
                    .then(b.block_hash.cmp(&a.block_hash))
            })
            .unwrap_or(genesis_checkpoint)
    }

    /// `C` is justified and a ⅔ supermajority of senders cast valid votes with
    /// `ffg_source == C` targeting `C.chkp_slot + 1`.
    pub fn is_finalized_checkpoint(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
        genesis_checkpoint: Checkpoint,
        checkpoint: Checkpoint,
    ) -> bool {
        if checkpoint == genesis_checkpoint {
            return true;
        }
        if !Self::is_justified_checkpoint(store, ctx, votes, genesis_checkpoint, checkpoint) {
            return false;
        }
        let balances = ctx.get_validator_set_for_slot(checkpoint.block_hash, checkpoint.block_slot);
        let senders: HashSet<NodeIdentity> = votes
            .iter()
            .filter(|v| {
                v.message.ffg_source == checkpoint
                    && v.message.ffg_target.chkp_slot == checkpoint.chkp_slot + 1
                    && VoteFilters::is_valid(store, ctx, v)
            })
            .map(|v| v.sender)
            .collect();
        let support: u64 = senders.iter().filter_map(|s| balances.get(s)).sum();
        3 * support >= 2 * types::total_weight(&balances)
    }

    /// Finalized checkpoint with the greatest `chkp_slot`, analogous to
    /// `highest_justified_checkpoint`.
    pub fn highest_finalized_checkpoint(
        store: &ChainStore,
        ctx: &dyn ExternalContext,
        votes: &HashSet<SignedVote>,
        genesis_checkpoint: Checkpoint,
    ) -> Checkpoint {
        Self::justified_checkpoints(store, ctx, votes, genesis_checkpoint)
            .into_iter()
            .filter(|c| Self::is_finalized_checkpoint(store, ctx, votes, genesis_checkpoint, *c))
            .max_by(|a, b| {
                a.chkp_slot
                    .cmp(&b.chkp_slot)
                    .then(b.block_hash.cmp(&a.block_hash))
            })
            .unwrap_or(genesis_checkpoint)
    }
}
