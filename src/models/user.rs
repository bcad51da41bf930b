use serde::{Deserialize, Serialize};

/// Author entry referenced by index from [`super::message::Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// Avatar URL or path, empty when the user has none.
    pub img: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInfoMinimal {
    pub id: String,
    pub display_name: String,
    pub avatar_url: String,
}

/// Row from room_members.
#[derive(Debug, Clone)]
pub struct MemberRow {
    pub room_id: String,
    pub user_id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub membership: String,
}

impl MemberRow {
    /// Falls back to the user id when no display name is set.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.user_id)
    }

    pub fn to_info(&self) -> MemberInfoMinimal {
        MemberInfoMinimal {
            id: self.user_id.clone(),
            display_name: self.name().to_string(),
            avatar_url: self.avatar_url.clone().unwrap_or_default(),
        }
    }

    pub fn to_user(&self) -> User {
        User {
            name: self.name().to_string(),
            img: self.avatar_url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    pub user_id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default = "default_membership")]
    pub membership: String,
}

fn default_membership() -> String {
    "join".to_string()
}
