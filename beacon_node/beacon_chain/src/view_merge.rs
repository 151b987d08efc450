use crate::NodeState;

/// Atomically folds the buffers into the view (spec §4.5): blocks merge into the
/// `ChainStore`, votes merge in from both `buffer_votes` and every block currently in view
/// (so a block's embedded evidence counts even if the vote message itself never arrived).
pub fn execute_view_merge(state: &mut NodeState) {
    state.store.insert_blocks(state.buffer_blocks.drain());

    let embedded: Vec<_> = state
        .store
        .iter()
        .flat_map(|(_, block)| block.votes.iter().cloned())
        .collect();

    state.view_votes.extend(state.buffer_votes.drain());
    state.view_votes.extend(embedded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestContext;
    use std::collections::HashSet;
    use types::{Block, Configuration, Hash, NodeIdentity};

    #[test]
    fn merges_buffered_blocks_and_votes() {
        let ctx = TestContext::with_validators([(NodeIdentity(0), 1)]);
        let genesis = Block::genesis(vec![]);
        let config = Configuration::new(genesis.clone());
        let mut state = NodeState::new(config, NodeIdentity(0), &ctx);

        let genesis_hash = state.genesis_hash();
        let b1 = Hash::from_low_u64(1);
        state.buffer_blocks.insert(
            b1,
            Block {
                parent_hash: genesis_hash,
                slot: 1,
                body: vec![],
                votes: HashSet::new(),
            },
        );

        execute_view_merge(&mut state);

        assert!(state.store.has(b1));
        assert!(state.buffer_blocks.is_empty());
        assert!(state.buffer_votes.is_empty());
    }

    /// P10: running the merge twice in a row is a no-op the second time.
    #[test]
    fn view_merge_is_idempotent() {
        let ctx = TestContext::with_validators([(NodeIdentity(0), 1)]);
        let genesis = Block::genesis(vec![]);
        let config = Configuration::new(genesis.clone());
        let mut state = NodeState::new(config, NodeIdentity(0), &ctx);

        execute_view_merge(&mut state);
        let votes_after_first = state.view_votes.clone();
        execute_view_merge(&mut state);
        assert_eq!(state.view_votes, votes_after_first);
    }
}
