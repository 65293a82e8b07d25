//! Presence Registry: maps live connections to their chosen identities.

use super::{
    entity::Session,
    value_object::{ConnectionId, Identity},
};

/// Registered sessions in join order.
#[derive(Debug, Clone, Default)]
pub struct PresenceRegistry {
    sessions: Vec<Session>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `identity` for the connection.
    ///
    /// A connection that joins again keeps its position; only the identity is replaced.
    pub fn join(&mut self, connection_id: ConnectionId, identity: Identity) -> Session {
        if let Some(existing) = self
            .sessions
            .iter_mut()
            .find(|session| session.connection_id == connection_id)
        {
            existing.identity = identity;
            return existing.clone();
        }

        let session = Session::new(connection_id, identity);
        self.sessions.push(session.clone());
        session
    }

    /// Remove the connection's session, if any.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<Session> {
        let index = self
            .sessions
            .iter()
            .position(|session| &session.connection_id == connection_id)?;
        Some(self.sessions.remove(index))
    }

    pub fn list(&self) -> Vec<Session> {
        self.sessions.clone()
    }

    pub fn get(&self, connection_id: &ConnectionId) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|session| &session.connection_id == connection_id)
    }

    /// The connection's identity, or the anonymous sentinel if it has not joined.
    pub fn resolve(&self, connection_id: &ConnectionId) -> Identity {
        self.get(connection_id)
            .map(|session| session.identity.clone())
            .unwrap_or_else(Identity::anonymous)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
