use crate::Block;
use serde_derive::{Deserialize, Serialize};

/// Network-delay bound used to derive slot/phase length.
pub const DEFAULT_DELTA: u64 = 10;

/// Default vote-lifetime bound, in slots.
pub const DEFAULT_ETA: u64 = 2;

/// Default confirmation depth.
pub const DEFAULT_K: u64 = 2;

/// Protocol parameters shared by every validator.
///
/// `genesis` has no sensible default and must always be supplied explicitly; `delta`,
/// `eta` and `k` fall back to the values above when omitted (e.g. when deserializing a
/// config file that only overrides a subset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Network-delay bound, in ticks. A slot lasts `4 * delta` ticks.
    pub delta: u64,
    /// Vote-lifetime bound, in slots: a vote cast at `slot` is expired once
    /// `current_slot > slot + eta`.
    pub eta: u64,
    /// Confirmation depth used by the available-chain rule.
    pub k: u64,
    pub genesis: Block,
}

impl Configuration {
    pub fn new(genesis: Block) -> Self {
        Self {
            delta: DEFAULT_DELTA,
            eta: DEFAULT_ETA,
            k: DEFAULT_K,
            genesis,
        }
    }

    /// Number of ticks in one slot.
    pub fn slot_duration(&self) -> u64 {
        4 * self.delta
    }
}

/// One quarter of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Propose,
    Vote,
    Confirm,
    Merge,
}

impl Phase {
    /// Derives `(slot, phase)` from a tick count, per the four equal windows
    /// `[0, delta)`, `[delta, 2*delta)`, `[2*delta, 3*delta)`, `[3*delta, 4*delta)`.
    pub fn from_time(time: u64, delta: u64) -> (u64, Phase) {
        let slot_duration = 4 * delta;
        let slot = time / slot_duration;
        let offset = time % slot_duration;
        let phase = if offset >= 3 * delta {
            Phase::Merge
        } else if offset >= 2 * delta {
            Phase::Confirm
        } else if offset >= delta {
            Phase::Vote
        } else {
            Phase::Propose
        };
        (slot, phase)
    }
}
