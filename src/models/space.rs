use serde::{Deserialize, Serialize};

/// Space entry for the space sidebar. No subtree, just the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceInfoMinimal {
    pub room_id: String,
    pub display_name: String,
    pub avatar_url: String,
    pub children_count: u64,
}

/// Display shape used by list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceInfo {
    pub id: String,
    pub name: String,
    pub img: String,
    pub children_count: u64,
}

impl From<SpaceInfoMinimal> for SpaceInfo {
    fn from(space: SpaceInfoMinimal) -> Self {
        Self {
            id: space.room_id,
            name: space.display_name,
            img: space.avatar_url,
            children_count: space.children_count,
        }
    }
}
