use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;
use crate::format;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Index into the user list this message is paired with. Not checked
    /// here; see [`Message::author`].
    pub user_index: usize,
    pub message: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl Message {
    pub fn author<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        users.get(self.user_index)
    }

    pub fn display_time(&self, now: DateTime<Utc>) -> Option<String> {
        format::format_epoch_millis(self.timestamp, now)
    }
}

/// Row from the messages table, with the sender's member profile joined in.
#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: i64,
    pub room_id: String,
    pub sender_id: String,
    pub sender_name: Option<String>,
    pub sender_avatar: Option<String>,
    pub body: String,
    pub ts_ms: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub sender_id: String,
    pub body: String,
    pub ts_ms: i64,
}

/// A page of room history. Senders are listed once each, in order of first
/// appearance, so every `user_index` is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub users: Vec<User>,
    pub messages: Vec<Message>,
}

impl Transcript {
    pub fn from_rows(rows: &[MessageRow]) -> Self {
        let mut users = Vec::new();
        let mut index_of: HashMap<&str, usize> = HashMap::new();
        let mut messages = Vec::with_capacity(rows.len());

        for row in rows {
            let user_index = *index_of.entry(row.sender_id.as_str()).or_insert_with(|| {
                users.push(User {
                    name: row
                        .sender_name
                        .clone()
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| row.sender_id.clone()),
                    img: row.sender_avatar.clone().unwrap_or_default(),
                });
                users.len() - 1
            });
            messages.push(Message {
                user_index,
                message: row.body.clone(),
                timestamp: row.ts_ms,
            });
        }

        Self { users, messages }
    }

    pub fn authors_resolve(&self) -> bool {
        self.messages.iter().all(|m| m.author(&self.users).is_some())
    }
}
