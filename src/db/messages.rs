use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::models::message::{MessageRow, NewMessage};

fn row_to_message(row: sqlx::sqlite::SqliteRow) -> MessageRow {
    MessageRow {
        id: row.get("id"),
        room_id: row.get("room_id"),
        sender_id: row.get("sender_id"),
        sender_name: row.get("display_name"),
        sender_avatar: row.get("avatar_url"),
        body: row.get("body"),
        ts_ms: row.get("ts_ms"),
    }
}

pub async fn insert_message(
    pool: &SqlitePool,
    room_id: &str,
    input: &NewMessage,
) -> Result<i64, AppError> {
    let result =
        sqlx::query("INSERT INTO messages (room_id, sender_id, body, ts_ms) VALUES (?, ?, ?, ?)")
            .bind(room_id)
            .bind(&input.sender_id)
            .bind(&input.body)
            .bind(input.ts_ms)
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

/// The latest `limit` messages of a room, returned oldest first.
pub async fn list_recent(
    pool: &SqlitePool,
    room_id: &str,
    limit: i64,
) -> Result<Vec<MessageRow>, AppError> {
    let rows = sqlx::query(
        "SELECT m.id, m.room_id, m.sender_id, m.body, m.ts_ms, rm.display_name, rm.avatar_url \
         FROM messages m \
         LEFT JOIN room_members rm ON rm.room_id = m.room_id AND rm.user_id = m.sender_id \
         WHERE m.room_id = ? \
         ORDER BY m.ts_ms DESC, m.id DESC LIMIT ?",
    )
    .bind(room_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut messages: Vec<MessageRow> = rows.into_iter().map(row_to_message).collect();
    messages.reverse();
    Ok(messages)
}
