//! FFG justification/finalization cascade: the safety half of 3-Slot Finality, built on top
//! of the `fork_choice` crate's block view and vote filters.

mod ffg;

#[cfg(test)]
mod test_utils;

pub use ffg::Ffg;

#[cfg(test)]
mod tests {
    use super::*;
    use fork_choice::ChainStore;
    use std::collections::HashSet;
    use test_utils::TestContext;
    use types::{Block, Checkpoint, Hash, NodeIdentity, Signature, SignedVote, Vote};

    fn block(parent: Hash, slot: u64) -> Block {
        Block {
            parent_hash: parent,
            slot,
            body: vec![],
            votes: Default::default(),
        }
    }

    fn signed_vote(
        slot: u64,
        head: Hash,
        source: Checkpoint,
        target: Checkpoint,
        sender: NodeIdentity,
    ) -> SignedVote {
        SignedVote {
            message: Vote {
                slot,
                head_hash: head,
                ffg_source: source,
                ffg_target: target,
            },
            signature: Signature(vec![]),
            sender,
        }
    }

    #[test]
    fn genesis_checkpoint_is_always_justified_and_finalized() {
        let genesis_hash = Hash::from_low_u64(0);
        let store = ChainStore::new(genesis_hash, Block::genesis(vec![]));
        let genesis_checkpoint = types::genesis_checkpoint(genesis_hash);
        let ctx = TestContext::with_validators([(NodeIdentity(0), 1)]);
        let votes = HashSet::new();

        assert!(Ffg::is_justified_checkpoint(
            &store,
            &ctx,
            &votes,
            genesis_checkpoint,
            genesis_checkpoint
        ));
    }

    /// S4: three votes from {A,B,C}, source = genesis, target = {B1,1,1}. B1 becomes
    /// justified and is the highest justified checkpoint.
    #[test]
    fn scenario_s4_justification() {
        let genesis_hash = Hash::from_low_u64(0);
        let genesis_checkpoint = types::genesis_checkpoint(genesis_hash);
        let mut store = ChainStore::new(genesis_hash, Block::genesis(vec![]));
        let b1 = Hash::from_low_u64(1);
        store.insert_blocks([(b1, block(genesis_hash, 1))]);

        let a = NodeIdentity(0);
        let b = NodeIdentity(1);
        let c = NodeIdentity(2);
        let ctx = TestContext::with_validators([(a, 1), (b, 1), (c, 1)]);

        let target = Checkpoint::new(b1, 1, 1);
        let votes: HashSet<SignedVote> = [a, b, c]
            .into_iter()
            .map(|sender| signed_vote(1, b1, genesis_checkpoint, target, sender))
            .collect();

        assert!(Ffg::is_justified_checkpoint(
            &store,
            &ctx,
            &votes,
            genesis_checkpoint,
            target
        ));
        assert_eq!(
            Ffg::highest_justified_checkpoint(&store, &ctx, &votes, genesis_checkpoint).chkp_slot,
            1
        );
    }

    /// S5: continuing S4, three more votes from {A,B,C} with source = {B1,1,1}, target =
    /// {B2,2,2} where B2 is a child of B1 at slot 2. {B1,1,1} becomes finalized.
    #[test]
    fn scenario_s5_finalization() {
        let genesis_hash = Hash::from_low_u64(0);
        let genesis_checkpoint = types::genesis_checkpoint(genesis_hash);
        let mut store = ChainStore::new(genesis_hash, Block::genesis(vec![]));
        let b1 = Hash::from_low_u64(1);
        let b2 = Hash::from_low_u64(2);
        store.insert_blocks([(b1, block(genesis_hash, 1)), (b2, block(b1, 2))]);

        let a = NodeIdentity(0);
        let b = NodeIdentity(1);
        let c = NodeIdentity(2);
        let ctx = TestContext::with_validators([(a, 1), (b, 1), (c, 1)]);

        let c1 = Checkpoint::new(b1, 1, 1);
        let c2 = Checkpoint::new(b2, 2, 2);

        let mut votes: HashSet<SignedVote> = [a, b, c]
            .into_iter()
            .map(|sender| signed_vote(1, b1, genesis_checkpoint, c1, sender))
            .collect();
        votes.extend([a, b, c].into_iter().map(|sender| signed_vote(2, b2, c1, c2, sender)));

        assert!(Ffg::is_finalized_checkpoint(
            &store,
            &ctx,
            &votes,
            genesis_checkpoint,
            c1
        ));
        // P5: finalized implies justified.
        assert!(Ffg::is_justified_checkpoint(
            &store, &ctx, &votes, genesis_checkpoint, c1
        ));
        assert_eq!(
            Ffg::highest_finalized_checkpoint(&store, &ctx, &votes, genesis_checkpoint),
            c1
        );
    }

    /// P4: justification only grows as votes/blocks are added, never shrinks.
    #[test]
    fn justification_is_monotonic_under_vote_additions() {
        let genesis_hash = Hash::from_low_u64(0);
        let genesis_checkpoint = types::genesis_checkpoint(genesis_hash);
        let mut store = ChainStore::new(genesis_hash, Block::genesis(vec![]));
        let b1 = Hash::from_low_u64(1);
        store.insert_blocks([(b1, block(genesis_hash, 1))]);

        let a = NodeIdentity(0);
        let b = NodeIdentity(1);
        let c = NodeIdentity(2);
        let ctx = TestContext::with_validators([(a, 1), (b, 1), (c, 1)]);
        let target = Checkpoint::new(b1, 1, 1);

        let votes_before: HashSet<SignedVote> = [a, b]
            .into_iter()
            .map(|sender| signed_vote(1, b1, genesis_checkpoint, target, sender))
            .collect();
        assert!(!Ffg::is_justified_checkpoint(
            &store,
            &ctx,
            &votes_before,
            genesis_checkpoint,
            target
        ));

        let mut votes_after = votes_before;
        votes_after.insert(signed_vote(1, b1, genesis_checkpoint, target, c));
        assert!(Ffg::is_justified_checkpoint(
            &store,
            &ctx,
            &votes_after,
            genesis_checkpoint,
            target
        ));
    }
}
