use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::models::room::{NewRoom, RoomRow, RoomStatus};

fn row_to_room(row: sqlx::sqlite::SqliteRow) -> Result<RoomRow, AppError> {
    let status: String = row.get("status");
    let status = status
        .parse::<RoomStatus>()
        .map_err(AppError::Internal)?;
    Ok(RoomRow {
        id: row.get("id"),
        display_name: row.get("display_name"),
        avatar_url: row.get("avatar_url"),
        is_space: row.get("is_space"),
        status,
    })
}

const SELECT_ROOMS: &str = "SELECT id, display_name, avatar_url, is_space, status FROM rooms";

pub async fn get_room_row(pool: &SqlitePool, room_id: &str) -> Result<RoomRow, AppError> {
    let row = sqlx::query(&format!("{SELECT_ROOMS} WHERE id = ?"))
        .bind(room_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("unknown_room".to_string()))?;

    row_to_room(row)
}

/// Every known room, oldest first.
pub async fn list_rooms(pool: &SqlitePool) -> Result<Vec<RoomRow>, AppError> {
    let rows = sqlx::query(&format!("{SELECT_ROOMS} ORDER BY created_at ASC, rowid ASC"))
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(row_to_room).collect()
}

/// Inserts a room, or refreshes its name, avatar and status if it exists.
pub async fn upsert_room(pool: &SqlitePool, input: &NewRoom) -> Result<RoomRow, AppError> {
    sqlx::query(
        "INSERT INTO rooms (id, display_name, avatar_url, is_space, status) VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET display_name = excluded.display_name, \
         avatar_url = excluded.avatar_url, is_space = excluded.is_space, status = excluded.status",
    )
    .bind(&input.id)
    .bind(&input.display_name)
    .bind(&input.avatar_url)
    .bind(input.is_space)
    .bind(input.status.as_str())
    .execute(pool)
    .await?;

    get_room_row(pool, &input.id).await
}

pub async fn set_status(
    pool: &SqlitePool,
    room_id: &str,
    status: RoomStatus,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE rooms SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(room_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("unknown_room".to_string()));
    }
    Ok(())
}
