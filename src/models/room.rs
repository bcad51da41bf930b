use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user's current relationship to a room. History and legal transitions
/// belong to the membership layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    Joined,
    Left,
    // Older clients wrote the misspelt form.
    #[serde(alias = "Infited")]
    Invited,
    Knocked,
    Banned,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Joined => "Joined",
            RoomStatus::Left => "Left",
            RoomStatus::Invited => "Invited",
            RoomStatus::Knocked => "Knocked",
            RoomStatus::Banned => "Banned",
        }
    }

    /// Whether a room with this status shows up in a space's room list.
    pub fn is_visible(&self) -> bool {
        matches!(
            self,
            RoomStatus::Joined | RoomStatus::Invited | RoomStatus::Knocked
        )
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Joined" => Ok(RoomStatus::Joined),
            "Left" => Ok(RoomStatus::Left),
            "Invited" | "Infited" => Ok(RoomStatus::Invited),
            "Knocked" => Ok(RoomStatus::Knocked),
            "Banned" => Ok(RoomStatus::Banned),
            other => Err(format!("unknown room status: {other}")),
        }
    }
}

/// A node of the room tree. `parent_ids` may name several spaces: rooms can
/// sit in more than one space.
///
/// `children_count` is authoritative. `children` is only filled in when the
/// subtree has been loaded and may hold fewer entries than the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomInfoMinimal {
    pub room_id: String,
    pub parent_ids: Vec<String>,
    pub status: RoomStatus,
    pub display_name: String,
    pub is_space: bool,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RoomInfoMinimal>>,
    pub children_count: u64,
}

impl RoomInfoMinimal {
    /// "1 subroom", "2 subrooms", taken from the count rather than the
    /// loaded children.
    pub fn subroom_label(&self) -> String {
        match self.children_count {
            1 => "1 subroom".to_string(),
            n => format!("{n} subrooms"),
        }
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.children
            .as_ref()
            .is_some_and(|c| c.len() as u64 == self.children_count)
    }

    pub fn loaded_children(&self) -> &[RoomInfoMinimal] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_parent(&self, parent_id: &str) -> bool {
        self.parent_ids.iter().any(|p| p == parent_id)
    }
}

/// Row from the rooms table, before any tree assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomRow {
    pub id: String,
    pub display_name: String,
    pub avatar_url: String,
    pub is_space: bool,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoom {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_space: bool,
    #[serde(default = "default_status")]
    pub status: RoomStatus,
}

fn default_status() -> RoomStatus {
    RoomStatus::Joined
}
