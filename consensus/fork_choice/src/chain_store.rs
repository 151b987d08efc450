use crate::Error;
use std::cell::RefCell;
use std::collections::HashMap;
use types::{Block, Hash};

/// Immutable-from-the-outside view of admitted blocks: `view_blocks` plus the genesis hash,
/// a `children` index maintained incrementally, and a memoized ancestor-relation cache.
///
/// Mirrors the teacher's `ForkChoice`/`ProtoArray` pairing of "block DAG storage" wrapped by
/// fork-choice logic, simplified to the naive recursive-descent GHOST the spec calls for
/// (rather than `ProtoArray`'s score-propagation optimization — this core has no need for
/// that extra bookkeeping at validator-set scale).
#[derive(Debug, Clone)]
pub struct ChainStore {
    genesis_hash: Hash,
    blocks: HashMap<Hash, Block>,
    children: HashMap<Hash, Vec<Hash>>,
    ancestor_cache: RefCell<HashMap<(Hash, Hash), bool>>,
}

impl ChainStore {
    /// Builds a store containing only `genesis`.
    pub fn new(genesis_hash: Hash, genesis: Block) -> Self {
        let mut blocks = HashMap::new();
        blocks.insert(genesis_hash, genesis);
        Self {
            genesis_hash,
            blocks,
            children: HashMap::new(),
            ancestor_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn genesis_hash(&self) -> Hash {
        self.genesis_hash
    }

    pub fn has(&self, hash: Hash) -> bool {
        self.blocks.contains_key(&hash)
    }

    pub fn get(&self, hash: Hash) -> Option<&Block> {
        self.blocks.get(&hash)
    }

    /// Admits `new_blocks` into the view. Invalidates the ancestor cache since new parent
    /// links can change ancestor/descendant answers for existing hashes.
    pub fn insert_blocks(&mut self, new_blocks: impl IntoIterator<Item = (Hash, Block)>) {
        let mut changed = false;
        for (hash, block) in new_blocks {
            if self.blocks.contains_key(&hash) {
                continue;
            }
            self.children
                .entry(block.parent_hash)
                .or_insert_with(Vec::new)
                .push(hash);
            self.blocks.insert(hash, block);
            changed = true;
        }
        if changed {
            self.ancestor_cache.borrow_mut().clear();
        }
    }

    pub fn parent(&self, hash: Hash) -> Result<Option<&Block>, Error> {
        let block = self.get(hash).ok_or(Error::MissingBlock(hash))?;
        if hash == self.genesis_hash {
            return Ok(None);
        }
        Ok(Some(
            self.get(block.parent_hash)
                .ok_or(Error::MissingBlock(block.parent_hash))?,
        ))
    }

    /// True iff the iterated `parent_hash` walk from `hash` reaches genesis.
    pub fn is_complete_chain(&self, hash: Hash) -> bool {
        let mut current = hash;
        loop {
            if current == self.genesis_hash {
                return true;
            }
            match self.blocks.get(&current) {
                Some(block) => current = block.parent_hash,
                None => return false,
            }
        }
    }

    /// True iff `ancestor == descendant`, or `descendant` is known, not genesis, and its
    /// parent chain reaches `ancestor`. Iterative with a memoized `(ancestor, descendant)`
    /// cache, invalidated whenever `view_blocks` changes.
    pub fn is_ancestor_descendant(&self, ancestor: Hash, descendant: Hash) -> bool {
        if ancestor == descendant {
            return true;
        }
        if let Some(&cached) = self.ancestor_cache.borrow().get(&(ancestor, descendant)) {
            return cached;
        }

        let mut current = descendant;
        let mut visited = Vec::new();
        let result = loop {
            if current == ancestor {
                break true;
            }
            if current == self.genesis_hash {
                break false;
            }
            visited.push(current);
            match self.blocks.get(&current) {
                Some(block) => current = block.parent_hash,
                None => break false,
            }
        };

        let mut cache = self.ancestor_cache.borrow_mut();
        cache.insert((ancestor, descendant), result);
        // Every hash visited along the way shares the same answer, since they all sit
        // between `ancestor` and `descendant` on a single chain.
        for hash in visited {
            cache.insert((ancestor, hash), result);
        }
        result
    }

    /// The chain from `hash` down to genesis, inclusive, nearest-first. Requires a complete
    /// chain.
    pub fn blockchain(&self, hash: Hash) -> Result<Vec<Hash>, Error> {
        if !self.is_complete_chain(hash) {
            return Err(Error::IncompleteChain(hash));
        }
        let mut out = vec![hash];
        let mut current = hash;
        while current != self.genesis_hash {
            let block = self.get(current).ok_or(Error::MissingBlock(current))?;
            current = block.parent_hash;
            out.push(current);
        }
        Ok(out)
    }

    /// `parent^k(head)`, clamped to genesis. Requires a complete chain.
    pub fn k_deep(&self, head: Hash, k: u64) -> Result<Hash, Error> {
        if !self.is_complete_chain(head) {
            return Err(Error::IncompleteChain(head));
        }
        let mut current = head;
        for _ in 0..k {
            if current == self.genesis_hash {
                break;
            }
            current = self
                .get(current)
                .ok_or(Error::MissingBlock(current))?
                .parent_hash;
        }
        Ok(current)
    }

    /// Every known block whose `parent_hash == hash`.
    pub fn children(&self, hash: Hash) -> &[Hash] {
        self.children.get(&hash).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterator over every `(hash, block)` currently admitted.
    pub fn iter(&self) -> impl Iterator<Item = (&Hash, &Block)> {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(parent: Hash, slot: u64) -> Block {
        Block {
            parent_hash: parent,
            slot,
            body: vec![],
            votes: Default::default(),
        }
    }

    fn setup() -> (ChainStore, Hash, Hash, Hash) {
        let genesis_hash = Hash::from_low_u64(0);
        let mut store = ChainStore::new(genesis_hash, Block::genesis(vec![]));
        let b1 = Hash::from_low_u64(1);
        let b2 = Hash::from_low_u64(2);
        store.insert_blocks([(b1, block(genesis_hash, 1)), (b2, block(b1, 2))]);
        (store, genesis_hash, b1, b2)
    }

    #[test]
    fn ancestor_descendant_relation() {
        let (store, genesis, b1, b2) = setup();
        assert!(store.is_ancestor_descendant(genesis, b2));
        assert!(store.is_ancestor_descendant(b1, b2));
        assert!(!store.is_ancestor_descendant(b2, b1));
        assert!(store.is_ancestor_descendant(b2, b2));
    }

    #[test]
    fn complete_chain_detection() {
        let (store, _genesis, _b1, b2) = setup();
        assert!(store.is_complete_chain(b2));
        assert!(!store.is_complete_chain(Hash::from_low_u64(99)));
    }

    #[test]
    fn k_deep_clamps_to_genesis() {
        let (store, genesis, b1, b2) = setup();
        assert_eq!(store.k_deep(b2, 0).unwrap(), b2);
        assert_eq!(store.k_deep(b2, 1).unwrap(), b1);
        assert_eq!(store.k_deep(b2, 5).unwrap(), genesis);
    }

    #[test]
    fn children_index_tracks_insertions() {
        let (store, genesis, b1, b2) = setup();
        assert_eq!(store.children(genesis), &[b1]);
        assert_eq!(store.children(b1), &[b2]);
        assert!(store.children(b2).is_empty());
    }

    #[test]
    fn blockchain_lists_nearest_first() {
        let (store, genesis, b1, b2) = setup();
        assert_eq!(store.blockchain(b2).unwrap(), vec![b2, b1, genesis]);
    }
}
