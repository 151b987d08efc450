use crate::NodeState;
use state_processing::Ffg;
use types::{Block, ExternalContext};

/// The finalized chain: `highest_finalized_checkpoint.block` down to genesis, inclusive.
pub fn finalized_chain(state: &NodeState, ctx: &dyn ExternalContext) -> Vec<Block> {
    let finalized = Ffg::highest_finalized_checkpoint(
        &state.store,
        ctx,
        &state.view_votes,
        state.genesis_checkpoint(),
    );
    chain_blocks(state, finalized.block_hash)
}

/// The available (dynamically-safe) chain: `chava` down to genesis, inclusive.
pub fn available_chain(state: &NodeState) -> Vec<Block> {
    chain_blocks(state, state.chava)
}

fn chain_blocks(state: &NodeState, from: types::Hash) -> Vec<Block> {
    match state.store.blockchain(from) {
        Ok(hashes) => hashes
            .into_iter()
            .filter_map(|hash| state.store.get(hash).cloned())
            .collect(),
        Err(_) => Vec::new(),
    }
}
