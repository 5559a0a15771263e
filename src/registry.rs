use std::collections::HashMap;
use log::debug;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::messages::ServerEvent;

pub type ConnectionId = Uuid;
pub type Outbound = mpsc::UnboundedSender<ServerEvent>;

/// Label used for connections that have not chosen a display name yet.
pub const UNNAMED_SENDER: &str = "anonymous";

#[derive(Debug)]
pub struct Session {
    name: Option<String>,
    room: Option<String>,
    outbound: Outbound,
}

impl Session {
    fn new(outbound: Outbound) -> Self {
        Session {
            name: None,
            room: None,
            outbound,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_SENDER)
    }

    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// The first name wins; later calls leave it untouched.
    pub fn set_name_once(&mut self, name: String) -> &str {
        self.name.get_or_insert(name)
    }

    pub fn set_room(&mut self, room: &str) {
        self.room = Some(room.to_string());
    }

    fn send(&self, event: ServerEvent) {
        if self.outbound.send(event).is_err() {
            debug!("Dropping event for a closed connection");
        }
    }
}

/// Live connections and their session state, plus the fan-out helpers that route by current room.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    sessions: HashMap<ConnectionId, Session>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ConnectionId, outbound: Outbound) {
        self.sessions.insert(id, Session::new(outbound));
    }

    pub fn remove(&mut self, id: ConnectionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn send_to(&self, id: ConnectionId, event: ServerEvent) {
        if let Some(session) = self.sessions.get(&id) {
            session.send(event);
        }
    }

    pub fn send_to_room(&self, room: &str, event: &ServerEvent, except: Option<ConnectionId>) {
        for (id, session) in &self.sessions {
            if Some(*id) != except && session.room() == Some(room) {
                session.send(event.clone());
            }
        }
    }

    pub fn send_to_all(&self, event: &ServerEvent) {
        for session in self.sessions.values() {
            session.send(event.clone());
        }
    }
}
