use crate::{ChainStore, Ghost};
use std::collections::HashSet;
use types::{Hash, SignedVote, ValidatorBalances};

/// Confirmation-candidate bookkeeping and the available-chain tip `chAva`, per spec §4.8.
pub struct AvailableChain;

impl AvailableChain {
    /// `ghost_weight(b) * 3 >= total_weight * 2`, restricted to `b` being an ancestor of
    /// `head` — confirmation never applies off the canonical chain.
    pub fn is_confirmed(
        store: &ChainStore,
        block: Hash,
        head: Hash,
        votes: &HashSet<SignedVote>,
        balances: &ValidatorBalances,
    ) -> bool {
        store.is_ancestor_descendant(block, head) && Ghost::is_confirmed(store, block, votes, balances)
    }

    /// At CONFIRM: grows `s_cand` with every currently-confirmed block.
    pub fn confirm_candidates(
        store: &ChainStore,
        s_cand: &mut HashSet<Hash>,
        head: Hash,
        votes: &HashSet<SignedVote>,
        balances: &ValidatorBalances,
    ) {
        for (hash, _) in store.iter() {
            if Self::is_confirmed(store, *hash, head, votes, balances) {
                s_cand.insert(*hash);
            }
        }
    }

    /// Element of `candidates` (by hash) with the highest block slot, breaking ties on the
    /// lexicographically smallest hash.
    fn argmax_slot(store: &ChainStore, candidates: impl IntoIterator<Item = Hash>) -> Option<Hash> {
        candidates
            .into_iter()
            .filter_map(|hash| store.get(hash).map(|b| (b.slot, hash)))
            .max_by(|(slot_a, hash_a), (slot_b, hash_b)| slot_a.cmp(slot_b).then(hash_b.cmp(hash_a)))
            .map(|(_, hash)| hash)
    }

    /// Runs the VOTE-phase `chava` update rule. `s_cand` is first pruned to ancestors of
    /// `head` and re-seeded with `highest_justified`; `chava` only moves when neither
    /// `bcand` nor the `k`-deep block is already an ancestor of the current `chava`.
    pub fn update_at_vote(
        store: &ChainStore,
        s_cand: &mut HashSet<Hash>,
        chava: Hash,
        head: Hash,
        highest_justified: Hash,
        k: u64,
    ) -> Result<Hash, crate::Error> {
        s_cand.retain(|b| store.is_ancestor_descendant(*b, head));
        s_cand.insert(highest_justified);

        let bcand = Self::argmax_slot(store, s_cand.iter().copied()).unwrap_or(highest_justified);
        let k_deep_block = store.k_deep(head, k)?;

        let bcand_covers_chava = store.is_ancestor_descendant(bcand, chava);
        let k_deep_covers_chava = store.is_ancestor_descendant(k_deep_block, chava);

        if bcand_covers_chava && k_deep_covers_chava {
            Ok(chava)
        } else {
            Ok(Self::argmax_slot(store, [bcand, k_deep_block]).unwrap_or(chava))
        }
    }
}
