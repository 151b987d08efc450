use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque validator identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIdentity(pub u64);

impl fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.0)
    }
}

/// Opaque authentication token. The core never inspects its contents, only passes it to
/// `ExternalContext::verify_vote_signature`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x{})", hex::encode(&self.0))
    }
}

/// Validator weights for a given `(block, slot)`, as returned by
/// `ExternalContext::get_validator_set_for_slot`. Every weight is a positive integer.
pub type ValidatorBalances = HashMap<NodeIdentity, u64>;

/// Sum of every weight in `balances`.
pub fn total_weight(balances: &ValidatorBalances) -> u64 {
    balances.values().sum()
}
