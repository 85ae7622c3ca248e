//! Message delivery to connected sessions.
//!
//! - `websocket`: [`LobbyNotifier`](crate::domain::LobbyNotifier) over the
//!   sessions' WebSocket transports

pub mod websocket;

pub use websocket::WebSocketLobbyNotifier;
