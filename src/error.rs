use crate::types::Uid;

/// Boundary errors raised when accepting events into an aggregate. The fold
/// itself is total and never fails; these cover malformed streams only.
#[derive(thiserror::Error, Debug)]
pub enum EventStreamError {
    #[error("event stream is empty")]
    EmptyStream,
    #[error("stream must start with a creation event")]
    NotCreation,
    #[error("creation event found after the stream head")]
    DuplicateCreation,
    #[error("event belongs to client file {got}, expected {expected}")]
    ForeignEvent { expected: Uid, got: Uid },
    #[error("event number {got} out of sequence, expected {expected}")]
    OutOfSequence { expected: u64, got: u64 },
}
