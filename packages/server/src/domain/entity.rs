//! Session entity and roster projection.

use super::{
    transport::{ReadyState, SessionTransport},
    value_object::{DisplayName, SessionId, Timestamp, WalletAddress},
};

/// Label shown for sessions that never sent a display name
pub const ANONYMOUS_LABEL: &str = "anon";

/// One client's live connection plus its identity fields
pub struct Session {
    pub id: SessionId,
    pub connected_at: Timestamp,
    pub display_name: Option<DisplayName>,
    pub wallet: Option<WalletAddress>,
    /// Cleared when a liveness ping is sent, set again on any inbound frame
    pub is_alive: bool,
    transport: Box<dyn SessionTransport>,
}

impl Session {
    /// Create a session with a freshly generated identifier
    pub fn new(transport: Box<dyn SessionTransport>, connected_at: Timestamp) -> Self {
        Self::with_id(SessionId::generate(), transport, connected_at)
    }

    pub fn with_id(
        id: SessionId,
        transport: Box<dyn SessionTransport>,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            id,
            connected_at,
            display_name: None,
            wallet: None,
            is_alive: true,
            transport,
        }
    }

    /// Apply the handshake fields, truncating untrusted input.
    pub fn identify(&mut self, username: Option<&str>, wallet: Option<&str>) {
        self.display_name = username.and_then(DisplayName::from_untrusted);
        self.wallet = wallet.and_then(WalletAddress::from_untrusted);
    }

    pub fn transport(&self) -> &dyn SessionTransport {
        self.transport.as_ref()
    }

    pub fn ready_state(&self) -> ReadyState {
        self.transport.ready_state()
    }

    pub fn is_open(&self) -> bool {
        self.ready_state() == ReadyState::Open
    }

    pub fn roster_entry(&self) -> RosterEntry {
        RosterEntry {
            id: self.id,
            name: self
                .display_name
                .as_ref()
                .map(|name| name.as_str().to_string())
                .unwrap_or_else(|| ANONYMOUS_LABEL.to_string()),
            wallet: self
                .wallet
                .as_ref()
                .map(WalletAddress::shortened)
                .unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("connected_at", &self.connected_at)
            .field("display_name", &self.display_name)
            .field("wallet", &self.wallet)
            .field("is_alive", &self.is_alive)
            .field("ready_state", &self.ready_state())
            .finish()
    }
}

/// Display row for the lobby UI list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: SessionId,
    /// Display name or [`ANONYMOUS_LABEL`]
    pub name: String,
    /// Shortened wallet or empty
    pub wallet: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transport::MockSessionTransport;

    fn open_transport() -> Box<dyn SessionTransport> {
        let mut transport = MockSessionTransport::new();
        transport
            .expect_ready_state()
            .return_const(ReadyState::Open);
        Box::new(transport)
    }

    #[test]
    fn test_new_session_is_anonymous_and_alive() {
        // given:
        let session = Session::new(open_transport(), Timestamp::new(1000));

        // when:
        let entry = session.roster_entry();

        // then:
        assert!(session.is_alive);
        assert_eq!(entry.name, ANONYMOUS_LABEL);
        assert_eq!(entry.wallet, "");
        assert_eq!(entry.id, session.id);
    }

    #[test]
    fn test_identify_sets_truncated_fields() {
        // given:
        let mut session = Session::new(open_transport(), Timestamp::new(1000));

        // when:
        session.identify(Some("alice"), Some("abcdefghijklmnop"));

        // then:
        let entry = session.roster_entry();
        assert_eq!(entry.name, "alice");
        assert_eq!(entry.wallet, "abc…nop");
    }

    #[test]
    fn test_identify_with_empty_fields_falls_back_to_anonymous() {
        // given:
        let mut session = Session::new(open_transport(), Timestamp::new(1000));
        session.identify(Some("alice"), Some("wallet"));

        // when: a second handshake without fields
        session.identify(None, Some(""));

        // then:
        let entry = session.roster_entry();
        assert_eq!(entry.name, ANONYMOUS_LABEL);
        assert_eq!(entry.wallet, "");
    }
}
