//! Utilities shared by the lobby server binary and its tests.

pub mod logger;
pub mod time;
