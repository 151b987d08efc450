use crate::outgoing::{OutgoingMessage, OutgoingMessages};
use crate::{head, proposer, view_merge, Error, NodeState};
use fork_choice::AvailableChain;
use types::{Checkpoint, ExternalContext, Phase};

/// Dispatches a clock tick to the phase handler for the new `(slot, phase)`, per spec §4.6.
/// A tick that does not change `(slot, phase)` is a no-op (P2).
pub fn on_tick(
    state: &mut NodeState,
    ctx: &dyn ExternalContext,
    log: &slog::Logger,
    time: u64,
) -> OutgoingMessages {
    let (new_slot, new_phase) = Phase::from_time(time, state.configuration.delta);
    if new_slot == state.current_slot && new_phase == state.current_phase {
        return Vec::new();
    }

    slog::debug!(log, "phase transition"; "slot" => new_slot, "phase" => ?new_phase);
    state.current_slot = new_slot;
    state.current_phase = new_phase;

    match new_phase {
        Phase::Propose => on_propose(state, ctx, log),
        Phase::Vote => on_vote(state, ctx, log),
        Phase::Confirm => on_confirm(state, ctx, log),
        Phase::Merge => on_merge(state, log),
    }
}

fn on_propose(state: &mut NodeState, ctx: &dyn ExternalContext, log: &slog::Logger) -> OutgoingMessages {
    if ctx.get_proposer(state.current_slot) == state.identity {
        vec![proposer::propose(state, ctx, log)]
    } else {
        Vec::new()
    }
}

fn on_vote(state: &mut NodeState, ctx: &dyn ExternalContext, log: &slog::Logger) -> OutgoingMessages {
    match try_on_vote(state, ctx, log) {
        Ok(messages) => messages,
        Err(e) => {
            slog::error!(log, "precondition violated in vote phase, state unchanged"; "error" => %e);
            Vec::new()
        }
    }
}

fn try_on_vote(
    state: &mut NodeState,
    ctx: &dyn ExternalContext,
    log: &slog::Logger,
) -> Result<OutgoingMessages, Error> {
    let head_hash = head::get_head(state, ctx);
    let justified = head::highest_justified(state, ctx);

    let new_chava = AvailableChain::update_at_vote(
        &state.store,
        &mut state.s_cand,
        state.chava,
        head_hash,
        justified.block_hash,
        state.configuration.k,
    )?;
    state.chava = new_chava;

    let chava_block = state
        .store
        .get(new_chava)
        .ok_or(Error::ChavaMissing(new_chava))?;
    let ffg_target = Checkpoint::new(new_chava, state.current_slot, chava_block.slot);

    let vote = types::Vote {
        slot: state.current_slot,
        head_hash,
        ffg_source: justified,
        ffg_target,
    };
    slog::debug!(log, "casting vote"; "slot" => state.current_slot, "head" => ?head_hash, "chava" => ?new_chava);
    Ok(vec![OutgoingMessage::Vote(ctx.sign_vote_message(vote))])
}

fn on_confirm(state: &mut NodeState, ctx: &dyn ExternalContext, log: &slog::Logger) -> OutgoingMessages {
    let head_hash = head::get_head(state, ctx);
    let justified = head::highest_justified(state, ctx);
    let balances = ctx.get_validator_set_for_slot(justified.block_hash, state.current_slot);

    let before = state.s_cand.len();
    AvailableChain::confirm_candidates(&state.store, &mut state.s_cand, head_hash, &state.view_votes, &balances);
    slog::trace!(log, "confirm phase"; "new_candidates" => state.s_cand.len() - before);
    Vec::new()
}

fn on_merge(state: &mut NodeState, log: &slog::Logger) -> OutgoingMessages {
    view_merge::execute_view_merge(state);
    slog::trace!(log, "view merge complete"; "blocks" => state.store.iter().count(), "votes" => state.view_votes.len());
    Vec::new()
}
