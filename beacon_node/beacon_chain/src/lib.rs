//! Per-validator 3-Slot-Finality driver: wires `ChainStore`/`VoteFilters`/`Ghost`
//! (`fork_choice`) and the FFG cascade (`state_processing`) into the public event API and
//! the `finalized_chain`/`available_chain` views, the way the teacher's `beacon_chain` crate
//! wires `fork_choice`/`state_processing` into `BeaconChain`.

mod error;
mod events;
mod head;
mod node_state;
mod outgoing;
mod phase_machine;
mod proposer;
#[cfg(test)]
mod test_utils;
mod view_merge;
mod views;

pub use error::Error;
pub use node_state::NodeState;
pub use outgoing::{OutgoingMessage, OutgoingMessages};

use types::{Block, ExternalContext, SignedPropose, SignedVote};

/// Clock tick: derives `(slot, phase)` from `time` and dispatches to the matching phase
/// handler. A no-op if `(slot, phase)` is unchanged (spec §4.6, property P2).
pub fn on_tick(
    state: &mut NodeState,
    ctx: &dyn ExternalContext,
    log: &slog::Logger,
    time: u64,
) -> OutgoingMessages {
    phase_machine::on_tick(state, ctx, log, time)
}

/// Stages a received block for the next view merge.
pub fn on_block_received(
    state: &mut NodeState,
    ctx: &dyn ExternalContext,
    log: &slog::Logger,
    block: Block,
) -> OutgoingMessages {
    events::on_block_received(state, ctx, log, block)
}

/// Stages a received vote for the next view merge.
pub fn on_vote_received(
    state: &mut NodeState,
    ctx: &dyn ExternalContext,
    log: &slog::Logger,
    vote: SignedVote,
) -> OutgoingMessages {
    events::on_vote_received(state, ctx, log, vote)
}

/// Stages a received proposal's block, and conditionally fast-merges its proposer view.
pub fn on_propose_received(
    state: &mut NodeState,
    ctx: &dyn ExternalContext,
    log: &slog::Logger,
    propose: SignedPropose,
) -> OutgoingMessages {
    events::on_propose_received(state, ctx, log, propose)
}

/// `get_head` exposed for callers that want the current fork-choice head without waiting for
/// a VOTE-phase tick (e.g. diagnostics).
pub fn get_head(state: &NodeState, ctx: &dyn ExternalContext) -> types::Hash {
    head::get_head(state, ctx)
}

/// Blocks from `highest_finalized_checkpoint.block` down to genesis, inclusive.
pub fn finalized_chain(state: &NodeState, ctx: &dyn ExternalContext) -> Vec<Block> {
    views::finalized_chain(state, ctx)
}

/// Blocks from `chava` down to genesis, inclusive.
pub fn available_chain(state: &NodeState) -> Vec<Block> {
    views::available_chain(state)
}
