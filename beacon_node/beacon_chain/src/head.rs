use crate::NodeState;
use fork_choice::{Ghost, VoteFilters};
use state_processing::Ffg;
use types::{Checkpoint, ExternalContext, Hash};

/// `highest_justified_checkpoint` over the current view.
pub fn highest_justified(state: &NodeState, ctx: &dyn ExternalContext) -> Checkpoint {
    Ffg::highest_justified_checkpoint(&state.store, ctx, &state.view_votes, state.genesis_checkpoint())
}

/// `highest_finalized_checkpoint` over the current view.
pub fn highest_finalized(state: &NodeState, ctx: &dyn ExternalContext) -> Checkpoint {
    Ffg::highest_finalized_checkpoint(&state.store, ctx, &state.view_votes, state.genesis_checkpoint())
}

/// `get_head` (spec §4.4): GHOST descent from the highest-justified block over votes
/// filtered invalid → equivocating → expired → LMD → descendant-of(highest_justified.block).
pub fn get_head(state: &NodeState, ctx: &dyn ExternalContext) -> Hash {
    let justified = highest_justified(state, ctx);
    let balances = ctx.get_validator_set_for_slot(justified.block_hash, state.current_slot);
    let candidate_votes = VoteFilters::ghost_candidate_votes(
        &state.store,
        ctx,
        &state.view_votes,
        state.current_slot,
        state.configuration.eta,
        justified.block_hash,
    );
    Ghost::find_head_from(&state.store, justified.block_hash, &candidate_votes, &balances)
}
