//! Connection registry and presence tracking.

use std::collections::HashMap;

use super::{
    entity::{RosterEntry, Session},
    value_object::SessionId,
};

/// Set of currently tracked sessions keyed by identifier.
///
/// The registry is the sole owner of every [`Session`] and therefore of its
/// transport handle.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session and return its identifier
    pub fn add(&mut self, session: Session) -> SessionId {
        let id = session.id;
        self.sessions.insert(id, session);
        id
    }

    /// Remove a session. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Iterate over all current sessions. Call again to restart.
    pub fn all(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut Session> {
        self.sessions.values_mut()
    }

    /// Number of tracked sessions, open or not
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of sessions whose transport is currently open.
    ///
    /// Recomputed on every call.
    pub fn count_open(&self) -> usize {
        self.all().filter(|session| session.is_open()).count()
    }

    /// Display list of every tracked session, ordered by arrival.
    ///
    /// Sessions whose transport is no longer open are still listed until
    /// they are pruned.
    pub fn roster(&self) -> Vec<RosterEntry> {
        let mut sessions: Vec<&Session> = self.all().collect();
        sessions.sort_by(|a, b| a.connected_at.cmp(&b.connected_at).then(a.id.cmp(&b.id)));
        sessions.iter().map(|session| session.roster_entry()).collect()
    }

    /// Drop every session whose transport is not open.
    ///
    /// Returns the identifiers that were removed.
    pub fn prune_closed(&mut self) -> Vec<SessionId> {
        let closed: Vec<SessionId> = self
            .all()
            .filter(|session| !session.is_open())
            .map(|session| session.id)
            .collect();
        for id in &closed {
            self.sessions.remove(id);
        }
        closed
    }
}
