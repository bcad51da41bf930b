use sqlx::SqlitePool;
use std::sync::Arc;

use crate::navigation::DefaultRooms;
use crate::theme::JsonFileStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub preferences: Arc<JsonFileStore>,
    pub default_rooms: Arc<DefaultRooms>,
    pub test_mode: bool,
}
