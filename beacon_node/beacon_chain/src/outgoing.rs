use types::{SignedPropose, SignedVote};

/// A message the driver produced as a side effect of handling one event. The core never
/// sends these anywhere itself — delivery is the host's job, per spec §6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    Vote(SignedVote),
    Propose(SignedPropose),
}

/// Zero or more messages produced by a single event-handler call.
pub type OutgoingMessages = Vec<OutgoingMessage>;
