//! Requests a session can make of the lobby.

/// Inbound message after decoding and field coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Identity handshake. Empty strings mean "not provided".
    Hello { username: String, wallet: String },
    Ping,
    ReqLobby,
    /// Any type this server does not handle
    Unknown,
}
