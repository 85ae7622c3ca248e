//! Lobby server: HTTP routes, WebSocket sessions and background timers.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerError};
