use crate::ChainStore;
use std::collections::HashSet;
use types::{total_weight, Hash, SignedVote, ValidatorBalances};

/// Weighted fork-choice descent from the highest-justified block, as described by spec §4.4.
pub struct Ghost;

impl Ghost {
    /// Sum of `balances[sender]` over every vote whose `head_hash` descends from (or equals)
    /// `block`, restricted to senders present in `balances`.
    pub fn ghost_weight(
        store: &ChainStore,
        block: Hash,
        votes: &HashSet<SignedVote>,
        balances: &ValidatorBalances,
    ) -> u64 {
        votes
            .iter()
            .filter(|v| store.is_ancestor_descendant(block, v.message.head_hash))
            .filter_map(|v| balances.get(&v.sender))
            .sum()
    }

    /// True iff `block`'s GHOST weight reaches a ⅔ supermajority of `total_weight(balances)`.
    pub fn is_confirmed(
        store: &ChainStore,
        block: Hash,
        votes: &HashSet<SignedVote>,
        balances: &ValidatorBalances,
    ) -> bool {
        let weight = Self::ghost_weight(store, block, votes, balances);
        3 * weight >= 2 * total_weight(balances)
    }

    /// Descends from `from` by repeatedly choosing the child with maximal `ghost_weight`,
    /// breaking ties on the lexicographically smallest hash, until a childless block is
    /// reached.
    pub fn find_head_from(
        store: &ChainStore,
        from: Hash,
        votes: &HashSet<SignedVote>,
        balances: &ValidatorBalances,
    ) -> Hash {
        let mut current = from;
        loop {
            let children = store.children(current);
            if children.is_empty() {
                return current;
            }
            current = *children
                .iter()
                .map(|child| (Self::ghost_weight(store, *child, votes, balances), *child))
                .max_by(|(weight_a, hash_a), (weight_b, hash_b)| {
                    weight_a.cmp(weight_b).then(hash_b.cmp(hash_a))
                })
                .map(|(_, hash)| hash)
                .expect("children is non-empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Block, NodeIdentity, Signature, Vote};

    fn block(parent: Hash, slot: u64) -> Block {
        Block {
            parent_hash: parent,
            slot,
            body: vec![],
            votes: Default::default(),
        }
    }

    fn vote_for(head: Hash, sender: NodeIdentity) -> SignedVote {
        SignedVote {
            message: Vote {
                slot: 1,
                head_hash: head,
                ffg_source: types::Checkpoint::new(Hash::zero(), 0, 0),
                ffg_target: types::Checkpoint::new(Hash::zero(), 0, 0),
            },
            signature: Signature(vec![]),
            sender,
        }
    }

    #[test]
    fn picks_heavier_child() {
        let genesis = Hash::from_low_u64(0);
        let mut store = ChainStore::new(genesis, Block::genesis(vec![]));
        let left = Hash::from_low_u64(1);
        let right = Hash::from_low_u64(2);
        store.insert_blocks([(left, block(genesis, 1)), (right, block(genesis, 1))]);

        let a = NodeIdentity(0);
        let b = NodeIdentity(1);
        let votes: HashSet<SignedVote> =
            [vote_for(left, a), vote_for(right, b)].into_iter().collect();
        let balances: ValidatorBalances = [(a, 1), (b, 2)].into_iter().collect();

        assert_eq!(Ghost::find_head_from(&store, genesis, &votes, &balances), right);
    }

    #[test]
    fn genesis_is_head_of_empty_view() {
        let genesis = Hash::from_low_u64(0);
        let store = ChainStore::new(genesis, Block::genesis(vec![]));
        let votes = HashSet::new();
        let balances = ValidatorBalances::new();
        assert_eq!(Ghost::find_head_from(&store, genesis, &votes, &balances), genesis);
    }
}
