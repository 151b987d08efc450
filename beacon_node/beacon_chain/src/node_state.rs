use fork_choice::ChainStore;
use std::collections::{HashMap, HashSet};
use types::{Block, Configuration, ExternalContext, Hash, NodeIdentity, Phase, SignedVote};

/// The full per-validator state the event handlers operate on (spec §3). Owned exclusively
/// by the driver embedding this crate; handlers take it by value and return the updated
/// state, the way the teacher's `BeaconChain` methods thread `&mut self` but never hand out
/// a reference another thread could mutate concurrently.
pub struct NodeState {
    pub configuration: Configuration,
    pub identity: NodeIdentity,
    pub current_slot: u64,
    pub current_phase: Phase,

    pub store: ChainStore,
    pub view_votes: HashSet<SignedVote>,

    pub buffer_blocks: HashMap<Hash, Block>,
    pub buffer_votes: HashSet<SignedVote>,

    pub s_cand: HashSet<Hash>,
    pub chava: Hash,
}

impl NodeState {
    /// Builds the state at genesis: slot 0, PROPOSE phase, `chava` and the lone `s_cand`
    /// member both the genesis block.
    pub fn new(configuration: Configuration, identity: NodeIdentity, ctx: &dyn ExternalContext) -> Self {
        let genesis = configuration.genesis.clone();
        let genesis_hash = ctx.block_hash(&genesis);
        let store = ChainStore::new(genesis_hash, genesis);
        let mut s_cand = HashSet::new();
        s_cand.insert(genesis_hash);

        Self {
            configuration,
            identity,
            current_slot: 0,
            current_phase: Phase::Propose,
            store,
            view_votes: HashSet::new(),
            buffer_blocks: HashMap::new(),
            buffer_votes: HashSet::new(),
            s_cand,
            chava: genesis_hash,
        }
    }

    pub fn genesis_hash(&self) -> Hash {
        self.store.genesis_hash()
    }

    pub fn genesis_checkpoint(&self) -> types::Checkpoint {
        types::genesis_checkpoint(self.genesis_hash())
    }
}
