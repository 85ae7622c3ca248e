//! Request handlers.

mod http;
mod websocket;

pub use http::{banner, debug_lobby_state, health_check};
pub use websocket::{root_handler, websocket_handler};
