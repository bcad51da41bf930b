pub mod graph;
pub mod hierarchy;

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;

pub use graph::{SpaceEdge, SpaceGraph};
pub use hierarchy::Hierarchy;

/// Loads every room and space edge into an in-memory [`Hierarchy`].
pub async fn load_hierarchy(pool: &SqlitePool) -> Result<Hierarchy, AppError> {
    let rooms = db::rooms::list_rooms(pool).await?;
    let edges = db::spaces::list_edges(pool).await?;
    let hierarchy = Hierarchy::new(rooms, edges);

    let dangling = hierarchy.dangling_parents();
    if !dangling.is_empty() {
        tracing::warn!(
            "{} space edge(s) reference unknown parent rooms",
            dangling.len()
        );
    }
    Ok(hierarchy)
}
