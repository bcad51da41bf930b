use std::collections::HashMap;

/// Lookup table from space id to the room a space opens on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultRooms {
    rooms: HashMap<String, String>,
}

impl DefaultRooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample ids served until the synced store knows every space.
    pub fn placeholder() -> Self {
        Self::new().with("1", "1").with("2", "3")
    }

    pub fn with(mut self, space_id: &str, room_id: &str) -> Self {
        self.rooms.insert(space_id.to_string(), room_id.to_string());
        self
    }

    /// Parses `space=room,space=room`. Malformed pairs are skipped.
    pub fn parse(raw: &str) -> Self {
        let rooms = raw
            .split(',')
            .filter_map(|pair| {
                let (space, room) = pair.split_once('=')?;
                let (space, room) = (space.trim(), room.trim());
                if space.is_empty() || room.is_empty() {
                    tracing::warn!("ignoring malformed default room entry {pair:?}");
                    return None;
                }
                Some((space.to_string(), room.to_string()))
            })
            .collect();
        Self { rooms }
    }

    pub fn get(&self, space_id: &str) -> Option<&str> {
        self.rooms.get(space_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Send the client to this room-scoped path.
    Redirect(String),
    /// No default room; the page renders its own fallback.
    Render,
}

impl Navigation {
    pub fn to_room(space_id: &str, room_id: Option<&str>) -> Self {
        match room_id {
            Some(room_id) => Navigation::Redirect(room_path(space_id, room_id)),
            None => Navigation::Render,
        }
    }

    pub fn for_space(space_id: &str, rooms: &DefaultRooms) -> Self {
        Self::to_room(space_id, rooms.get(space_id))
    }
}

/// Each id is percent-encoded as a single path segment.
pub fn room_path(space_id: &str, room_id: &str) -> String {
    format!(
        "/spaces/{}/room/{}",
        urlencoding::encode(space_id),
        urlencoding::encode(room_id)
    )
}
