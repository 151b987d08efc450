use crate::outgoing::OutgoingMessage;
use crate::{head, view_merge, NodeState};
use fork_choice::VoteFilters;
use std::collections::HashSet;
use types::{Block, ExternalContext, ProposeMessage, SignedVote};

/// Runs the PROPOSE-phase block-construction rule (spec §4.7) for the local validator.
/// Callers must have already checked `get_proposer(current_slot) == state.identity`.
pub fn propose(state: &mut NodeState, ctx: &dyn ExternalContext, log: &slog::Logger) -> OutgoingMessage {
    view_merge::execute_view_merge(state);

    let head_hash = head::get_head(state, ctx);
    let votes_in_parent_chain: HashSet<SignedVote> =
        VoteFilters::retain_in_chain_of(&state.store, &state.view_votes, head_hash);

    let embedded_in_parent_chain = votes_embedded_in_chain(state, head_hash);

    let votes_to_embed: HashSet<SignedVote> = VoteFilters::retain_valid(&state.store, ctx, &votes_in_parent_chain)
        .into_iter()
        .filter(|v| !embedded_in_parent_chain.contains(v))
        .collect();

    let new_block = Block {
        parent_hash: head_hash,
        slot: state.current_slot,
        body: ctx.get_block_body(),
        votes: votes_to_embed.clone(),
    };
    let justified = head::highest_justified(state, ctx);
    let proposer_view: Vec<SignedVote> = {
        let fresh = VoteFilters::retain_non_expired(&state.view_votes, state.current_slot, state.configuration.eta);
        let valid = VoteFilters::retain_valid(&state.store, ctx, &fresh);
        let descends_from_justified = VoteFilters::retain_descendant_of(&state.store, &valid, justified.block_hash);
        let in_parent_chain = VoteFilters::retain_in_chain_of(&state.store, &descends_from_justified, head_hash);
        descends_from_justified
            .into_iter()
            .filter(|v| !in_parent_chain.contains(v))
            .collect()
    };

    slog::debug!(log, "proposing block"; "slot" => state.current_slot, "parent" => ?head_hash, "embedded_votes" => votes_to_embed.len());

    let message = ProposeMessage {
        block: new_block,
        proposer_view,
    };
    OutgoingMessage::Propose(ctx.sign_propose_message(message))
}

/// Every vote embedded in a block on the chain from `head` down to genesis — already-known
/// evidence the proposer must not re-embed.
fn votes_embedded_in_chain(state: &NodeState, head: types::Hash) -> HashSet<SignedVote> {
    match state.store.blockchain(head) {
        Ok(chain) => chain
            .into_iter()
            .filter_map(|hash| state.store.get(hash))
            .flat_map(|block| block.votes.iter().cloned())
            .collect(),
        Err(_) => HashSet::new(),
    }
}
