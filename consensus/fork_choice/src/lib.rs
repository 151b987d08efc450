//! GHOST fork-choice: block-view storage, vote-filtering pipeline, weighted descent, and
//! the available-chain (`chAva`/`s_cand`) maintenance rule.
//!
//! Layered directly on `types`, the way the teacher stack's `fork_choice` crate sits on
//! `types` beneath `beacon_chain`.

mod available_chain;
mod chain_store;
mod error;
mod ghost;
mod vote_filters;

pub use available_chain::AvailableChain;
pub use chain_store::ChainStore;
pub use error::Error;
pub use ghost::Ghost;
pub use vote_filters::VoteFilters;
