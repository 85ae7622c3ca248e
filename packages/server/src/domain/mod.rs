//! Domain layer: sessions, the connection registry and the lobby state machine.
//!
//! Nothing here performs I/O. Transports and message delivery are reached
//! through the [`SessionTransport`] and [`LobbyNotifier`] traits implemented
//! by the infrastructure layer.

pub mod entity;
pub mod lobby;
pub mod message;
pub mod notifier;
pub mod registry;
pub mod transport;
pub mod value_object;

pub use entity::{ANONYMOUS_LABEL, RosterEntry, Session};
pub use lobby::{
    DisconnectOutcome, JoinOutcome, Lobby, LobbyRules, LobbyState, LobbyStatus, TickOutcome,
    WorldSize,
};
pub use message::InboundMessage;
pub use notifier::{LobbyNotifier, MessagePushError};
pub use registry::SessionRegistry;
pub use transport::{ReadyState, SessionTransport, TransportError};
pub use value_object::{DisplayName, SessionId, Timestamp, WalletAddress, shorten_wallet};
