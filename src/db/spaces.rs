use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::spaces::SpaceEdge;

/// Records `child_id` as a child of `parent_id`. Re-adding an existing edge
/// keeps its original timestamp.
pub async fn add_child(
    pool: &SqlitePool,
    parent_id: &str,
    child_id: &str,
    added_at: Option<i64>,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO space_children (parent_id, child_id, added_at) VALUES (?, ?, ?) \
         ON CONFLICT(parent_id, child_id) DO NOTHING",
    )
    .bind(parent_id)
    .bind(child_id)
    .bind(added_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// All edges, oldest first; untimestamped edges come last in insertion order.
pub async fn list_edges(pool: &SqlitePool) -> Result<Vec<SpaceEdge>, AppError> {
    let rows = sqlx::query(
        "SELECT parent_id, child_id, added_at FROM space_children \
         ORDER BY (added_at IS NULL) ASC, added_at ASC, rowid ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SpaceEdge {
            from: row.get("parent_id"),
            to: row.get("child_id"),
            added_at: row.get("added_at"),
        })
        .collect())
}
