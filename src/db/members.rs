use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::models::user::{MemberRow, NewMember};

fn row_to_member(row: sqlx::sqlite::SqliteRow) -> MemberRow {
    MemberRow {
        room_id: row.get("room_id"),
        user_id: row.get("user_id"),
        display_name: row.get("display_name"),
        avatar_url: row.get("avatar_url"),
        membership: row.get("membership"),
    }
}

const SELECT_MEMBERS: &str =
    "SELECT room_id, user_id, display_name, avatar_url, membership FROM room_members";

pub async fn upsert_member(
    pool: &SqlitePool,
    room_id: &str,
    input: &NewMember,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO room_members (room_id, user_id, display_name, avatar_url, membership) \
         VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(room_id, user_id) DO UPDATE SET display_name = excluded.display_name, \
         avatar_url = excluded.avatar_url, membership = excluded.membership",
    )
    .bind(room_id)
    .bind(&input.user_id)
    .bind(&input.display_name)
    .bind(&input.avatar_url)
    .bind(&input.membership)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_joined_members(
    pool: &SqlitePool,
    room_id: &str,
) -> Result<Vec<MemberRow>, AppError> {
    let rows = sqlx::query(&format!(
        "{SELECT_MEMBERS} WHERE room_id = ? AND membership = 'join' ORDER BY user_id ASC"
    ))
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_member).collect())
}
