/// Errors surfaced by `beacon_chain` itself, as opposed to the `fork_choice`/`state_processing`
/// errors it wraps. Per SPEC_FULL §4.10, none of these ever reach an event handler's own
/// caller — `phase_machine` catches them at the dispatch boundary, logs, and returns the prior
/// state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A `fork_choice` precondition was violated while processing an event.
    ForkChoice(fork_choice::Error),
    /// `chava` advanced to a hash not present in the local view.
    ChavaMissing(types::Hash),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ForkChoice(e) => write!(f, "fork choice precondition violated: {}", e),
            Error::ChavaMissing(hash) => write!(f, "chava {:?} not present in view", hash),
        }
    }
}

impl std::error::Error for Error {}

impl From<fork_choice::Error> for Error {
    fn from(e: fork_choice::Error) -> Self {
        Error::ForkChoice(e)
    }
}
