//! Transport implementations.
//!
//! - `websocket`: channel-fed WebSocket writer

pub mod websocket;

pub use websocket::{CloseSignal, OutboundFrame, PusherReceiver, WebSocketTransport};
