//! Infrastructure layer: wire formats, transports and message delivery.

pub mod dto;
pub mod message_pusher;
pub mod transport;
