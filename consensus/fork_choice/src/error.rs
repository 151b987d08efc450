use types::Hash;

/// Errors raised by `ChainStore` operations whose preconditions are violated.
///
/// These are all "PreconditionViolation"-class per spec §7: they only ever surface because
/// of a `view_blocks`/`buffer` inconsistency that should be impossible under the node's own
/// invariants. Callers at the top of the stack (the event handlers in `beacon_chain`) treat
/// any of these as a reason to abort the handler and return state unchanged — they are
/// never translated into a value handed back to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `get`/`parent` was asked for a hash that is not in `view_blocks`.
    MissingBlock(Hash),
    /// `blockchain`/`k_deep` was called on a block whose ancestry does not reach genesis.
    IncompleteChain(Hash),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingBlock(h) => write!(f, "block {:?} is not in the view", h),
            Error::IncompleteChain(h) => write!(f, "block {:?} has no complete chain to genesis", h),
        }
    }
}

impl std::error::Error for Error {}
