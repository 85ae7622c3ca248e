//! UseCase error types.

use thiserror::Error;

use crate::domain::SessionId;

/// Errors raised while handling an inbound client message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandleMessageError {
    /// The session was pruned before its message was processed
    #[error("session '{0}' is no longer registered")]
    SessionNotFound(SessionId),
}
