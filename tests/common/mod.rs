#![allow(dead_code)]

use axum::body::Body;
use http::{Method, Request};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

use trellis::db;
use trellis::models::message::NewMessage;
use trellis::models::room::{NewRoom, RoomStatus};
use trellis::models::user::NewMember;
use trellis::navigation::DefaultRooms;
use trellis::routes;
use trellis::state::AppState;
use trellis::theme::JsonFileStore;

/// Test server that owns an in-memory SQLite pool, a scratch preferences
/// file and the full AppState. Each instance is isolated.
pub struct TestServer {
    pub state: AppState,
    _prefs_dir: TempDir,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_default_rooms(DefaultRooms::placeholder()).await
    }

    pub async fn with_default_rooms(default_rooms: DefaultRooms) -> Self {
        let pool = db::create_pool("sqlite::memory:")
            .await
            .expect("failed to create test pool");
        let prefs_dir = tempfile::tempdir().expect("failed to create temp dir");

        let state = AppState {
            db: pool,
            preferences: Arc::new(JsonFileStore::new(prefs_dir.path().join("prefs.json"))),
            default_rooms: Arc::new(default_rooms),
            test_mode: true,
        };

        Self {
            state,
            _prefs_dir: prefs_dir,
        }
    }

    /// Returns an Axum Router wired to this server's state for `oneshot()` calls.
    pub fn router(&self) -> axum::Router {
        routes::router(self.state.clone())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.db
    }

    pub fn preferences_path(&self) -> std::path::PathBuf {
        self.state.preferences.path().to_path_buf()
    }

    pub async fn create_space(&self, id: &str, name: &str) {
        self.create_room_with(id, name, true, RoomStatus::Joined).await;
    }

    pub async fn create_room(&self, id: &str, name: &str, status: RoomStatus) {
        self.create_room_with(id, name, false, status).await;
    }

    async fn create_room_with(&self, id: &str, name: &str, is_space: bool, status: RoomStatus) {
        db::rooms::upsert_room(
            self.pool(),
            &NewRoom {
                id: id.to_string(),
                display_name: name.to_string(),
                avatar_url: format!("mxc://trellis.test/{name}"),
                is_space,
                status,
            },
        )
        .await
        .expect("failed to create test room");
    }

    pub async fn link(&self, parent: &str, child: &str, added_at: i64) {
        db::spaces::add_child(self.pool(), parent, child, Some(added_at))
            .await
            .expect("failed to link rooms");
    }

    pub async fn join(&self, room_id: &str, user_id: &str, display_name: Option<&str>) {
        db::members::upsert_member(
            self.pool(),
            room_id,
            &NewMember {
                user_id: user_id.to_string(),
                display_name: display_name.map(str::to_string),
                avatar_url: None,
                membership: "join".to_string(),
            },
        )
        .await
        .expect("failed to add member");
    }

    pub async fn post_message(&self, room_id: &str, sender: &str, body: &str, ts_ms: i64) {
        db::messages::insert_message(
            self.pool(),
            room_id,
            &NewMessage {
                sender_id: sender.to_string(),
                body: body.to_string(),
                ts_ms,
            },
        )
        .await
        .expect("failed to insert message");
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
