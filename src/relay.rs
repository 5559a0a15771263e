use chrono::{Local, NaiveTime};
use log::{debug, info};

use crate::config::RelayConfig;
use crate::directory::{RoomDirectory, DEFAULT_ROOM};
use crate::error::RelayError;
use crate::messages::{ClientEvent, ServerEvent};
use crate::registry::{ConnectionId, ConnectionRegistry, Outbound};

pub type Clock = Box<dyn Fn() -> NaiveTime + Send + Sync>;

/// Formats one chat line as `HH:mm - name: text`.
pub fn chat_line(time: NaiveTime, display_name: &str, text: &str) -> String {
    format!("{} - {display_name}: {text}", time.format("%H:%M"))
}

fn joined_notice(name: &str) -> String {
    format!("{name} has joined the room.")
}

fn left_notice(name: &str) -> String {
    format!("{name} has left the room.")
}

/// All relay state: the room directory and the live connections.
///
/// Every operation runs to completion against `&mut self`, so callers that share a relay
/// across tasks must put it behind a single lock.
pub struct Relay {
    config: RelayConfig,
    directory: RoomDirectory,
    registry: ConnectionRegistry,
    clock: Clock,
}

impl Relay {
    pub fn new(config: RelayConfig) -> Self {
        Self::with_clock(config, Box::new(|| Local::now().time()))
    }

    pub fn with_clock(config: RelayConfig, clock: Clock) -> Self {
        Relay {
            config,
            directory: RoomDirectory::new(),
            registry: ConnectionRegistry::new(),
            clock,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn room_names(&self) -> Vec<String> {
        self.directory.room_names()
    }

    pub fn members(&self, room: &str) -> Option<&[String]> {
        self.directory.room(room).map(crate::room::Room::members)
    }

    pub fn current_room(&self, id: ConnectionId) -> Option<&str> {
        self.registry.get(id).and_then(|session| session.room())
    }

    pub fn display_name(&self, id: ConnectionId) -> Option<&str> {
        self.registry.get(id).and_then(|session| session.name())
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    /// Registers a fresh connection, sends it the room list and prompts for a name.
    pub fn connect(&mut self, id: ConnectionId, outbound: Outbound) {
        self.registry.register(id, outbound);
        self.registry
            .send_to(id, ServerEvent::UpdateRoomList(self.directory.room_names()));
        self.registry.send_to(id, ServerEvent::ChooseName);
    }

    pub fn dispatch(&mut self, id: ConnectionId, event: ClientEvent) -> Result<(), RelayError> {
        match event {
            ClientEvent::ChooseName(name) => self.choose_name(id, name),
            ClientEvent::CreateRoom(room) => self.create_room(&room).map(|_| ()),
            ClientEvent::JoinRoom(room) => self.join_room(id, &room),
            ClientEvent::ChatMessage(text) => self.chat_message(id, &text),
        }
    }

    /// Records the display name (first call only) and moves the connection into the default room.
    pub fn choose_name(&mut self, id: ConnectionId, name: String) -> Result<(), RelayError> {
        self.config.name_policy.check(&name)?;
        let session = self
            .registry
            .get_mut(id)
            .ok_or(RelayError::UnknownConnection(id))?;
        let name = session.set_name_once(name).to_string();
        let previous = session.room().map(str::to_string);
        info!("Connection {id} is now known as {name:?}");

        if let Some(previous) = previous.filter(|room| room != DEFAULT_ROOM) {
            self.leave(id, &previous, Some(&name), &name);
        }
        self.enter(id, DEFAULT_ROOM, Some(&name), &name);
        Ok(())
    }

    /// Creates `room` if it does not exist yet and tells every connection about the new room set.
    /// Returns whether a room was created.
    pub fn create_room(&mut self, room: &str) -> Result<bool, RelayError> {
        self.config.name_policy.check(room)?;
        if !self.directory.create_room(room) {
            return Ok(false);
        }
        info!("Room {room:?} created");
        self.registry
            .send_to_all(&ServerEvent::UpdateRoomList(self.directory.room_names()));
        Ok(true)
    }

    /// Moves the connection from its current room into `room`. The leave side is fully
    /// applied before the join side starts.
    pub fn join_room(&mut self, id: ConnectionId, room: &str) -> Result<(), RelayError> {
        if !self.directory.contains(room) {
            return Err(RelayError::RoomNotFound(room.to_string()));
        }
        let session = self
            .registry
            .get(id)
            .ok_or(RelayError::UnknownConnection(id))?;
        let name = session.name().map(str::to_string);
        let label = session.label().to_string();
        let previous = session.room().map(str::to_string);

        if let Some(previous) = previous {
            self.leave(id, &previous, name.as_deref(), &label);
        }
        self.enter(id, room, name.as_deref(), &label);
        Ok(())
    }

    pub fn chat_message(&mut self, id: ConnectionId, text: &str) -> Result<(), RelayError> {
        let session = self
            .registry
            .get(id)
            .ok_or(RelayError::UnknownConnection(id))?;
        let label = session.label().to_string();
        match session.room().map(str::to_string) {
            Some(room) => self.broadcast_message(&room, &label, text),
            None => debug!("Dropping chat from {id}: not in any room"),
        }
        Ok(())
    }

    /// Sends a timestamped chat line to every connection in `room`, sender included.
    pub fn broadcast_message(&self, room: &str, display_name: &str, text: &str) {
        let line = chat_line((self.clock)(), display_name, text);
        self.registry
            .send_to_room(room, &ServerEvent::ChatMessage(line), None);
    }

    /// Tears down the session as an implicit leave, then resyncs every remaining connection's
    /// room list. Unknown ids are ignored.
    pub fn disconnect(&mut self, id: ConnectionId) {
        let Some(session) = self.registry.remove(id) else {
            return;
        };
        info!("Connection {id} ({}) disconnected", session.label());
        if let Some(room) = session.room() {
            self.leave(id, room, session.name(), session.label());
        }
        self.registry
            .send_to_all(&ServerEvent::UpdateRoomList(self.directory.room_names()));
    }

    fn leave(&mut self, id: ConnectionId, room: &str, name: Option<&str>, label: &str) {
        self.registry.send_to_room(
            room,
            &ServerEvent::ChatMessage(left_notice(label)),
            Some(id),
        );
        let removed = match (name, self.directory.room_mut(room)) {
            (Some(name), Some(entry)) => entry.remove_member(name),
            _ => false,
        };
        if removed {
            self.registry.send_to_room(
                room,
                &ServerEvent::UpdateUserList(self.directory.members(room)),
                None,
            );
        }
    }

    fn enter(&mut self, id: ConnectionId, room: &str, name: Option<&str>, label: &str) {
        if let Some(session) = self.registry.get_mut(id) {
            session.set_room(room);
        }
        if let (Some(name), Some(entry)) = (name, self.directory.room_mut(room)) {
            entry.add_member(name);
        }
        self.registry
            .send_to(id, ServerEvent::UpdateCurrentRoom(room.to_string()));
        self.registry.send_to_room(
            room,
            &ServerEvent::UpdateUserList(self.directory.members(room)),
            None,
        );
        self.registry.send_to_room(
            room,
            &ServerEvent::ChatMessage(joined_notice(label)),
            Some(id),
        );
    }
}
