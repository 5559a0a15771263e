use std::collections::HashMap;

use crate::room::Room;

pub const DEFAULT_ROOM: &str = "Everyone";

/// Room name to member list. Rooms are never removed; names are listed in creation order.
#[derive(Debug)]
pub struct RoomDirectory {
    rooms: HashMap<String, Room>,
    order: Vec<String>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        let mut directory = RoomDirectory {
            rooms: HashMap::new(),
            order: Vec::new(),
        };
        directory.create_room(DEFAULT_ROOM);
        directory
    }

    /// Inserts an empty room. Returns `false` if the name is already taken.
    pub fn create_room(&mut self, name: &str) -> bool {
        if self.rooms.contains_key(name) {
            return false;
        }
        self.rooms.insert(name.to_string(), Room::new(name));
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn room_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.rooms.get_mut(name)
    }

    pub fn room_names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn members(&self, name: &str) -> Vec<String> {
        self.rooms
            .get(name)
            .map(|room| room.members().to_vec())
            .unwrap_or_default()
    }
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new()
    }
}
