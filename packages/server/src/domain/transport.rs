//! Transport abstraction owned by each session.
//!
//! The domain only needs to know whether a connection can currently carry
//! frames and how to push a frame into it. Concrete implementations live in
//! the infrastructure layer.

use thiserror::Error;

/// Readiness of the underlying connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyState {
    /// Frames can be sent and received
    Open,
    /// Close handshake started, not yet removed from the registry
    Closing,
    /// Writer side is gone
    Closed,
}

/// Errors raised when pushing into a transport
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport is closed")]
    Closed,

    #[error("failed to push frame: {0}")]
    PushFailed(String),
}

/// Connection handle stored in a [`Session`](super::Session).
///
/// All operations are fire-and-forget: they never block waiting for the
/// peer.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTransport: Send + Sync {
    /// Current readiness of the connection
    fn ready_state(&self) -> ReadyState;

    /// Queue a text frame for delivery
    fn send_text(&self, text: &str) -> Result<(), TransportError>;

    /// Queue a transport-level liveness ping
    fn send_ping(&self) -> Result<(), TransportError>;
}
