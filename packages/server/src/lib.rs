//! Real-time lobby coordinator for a multiplayer game.
//!
//! Players connect over WebSocket, identify themselves, and are held in a
//! shared lobby that counts down to a match once enough of them are present.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
