use crate::outgoing::OutgoingMessages;
use crate::NodeState;
use types::{Block, ExternalContext, Phase, SignedPropose, SignedVote};

/// A received block is always staged, never admitted straight to the view — it migrates in
/// at the next `execute_view_merge` (spec §3 Lifecycle).
pub fn on_block_received(
    state: &mut NodeState,
    ctx: &dyn ExternalContext,
    log: &slog::Logger,
    block: Block,
) -> OutgoingMessages {
    let hash = ctx.block_hash(&block);
    if state.store.has(hash) || state.buffer_blocks.contains_key(&hash) {
        return Vec::new();
    }
    slog::debug!(log, "buffered received block"; "hash" => ?hash, "slot" => block.slot);
    state.buffer_blocks.insert(hash, block);
    Vec::new()
}

/// A received vote is always staged; `valid_vote`/equivocation/expiry are evaluated lazily
/// wherever a predicate consumes `view_votes`, not at admission time (spec §7).
pub fn on_vote_received(
    state: &mut NodeState,
    _ctx: &dyn ExternalContext,
    log: &slog::Logger,
    vote: SignedVote,
) -> OutgoingMessages {
    if state.view_votes.contains(&vote) || state.buffer_votes.contains(&vote) {
        return Vec::new();
    }
    slog::trace!(log, "buffered received vote"; "sender" => ?vote.sender, "slot" => vote.message.slot);
    state.buffer_votes.insert(vote);
    Vec::new()
}

/// Per the resolved reference-implementation behavior (SPEC_FULL §3): `propose.block` is
/// always staged into `buffer_blocks` like any other received block. Its `proposer_view`
/// votes are merged directly into `view_votes` only when the node is currently in the
/// PROPOSE phase — i.e. about to vote in the same slot the proposal targets — and are
/// dropped entirely otherwise.
pub fn on_propose_received(
    state: &mut NodeState,
    ctx: &dyn ExternalContext,
    log: &slog::Logger,
    propose: SignedPropose,
) -> OutgoingMessages {
    let block_hash = ctx.block_hash(&propose.message.block);
    if !state.store.has(block_hash) && !state.buffer_blocks.contains_key(&block_hash) {
        slog::debug!(log, "buffered block from proposal"; "hash" => ?block_hash);
        state.buffer_blocks.insert(block_hash, propose.message.block);
    }

    if state.current_phase == Phase::Propose {
        slog::trace!(log, "merging proposer view early"; "votes" => propose.message.proposer_view.len());
        state.view_votes.extend(propose.message.proposer_view);
    }
    Vec::new()
}
