use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::db;
use crate::error::AppError;
use crate::models::message::NewMessage;
use crate::models::room::{NewRoom, RoomStatus};
use crate::models::user::NewMember;
use crate::state::AppState;

const SPACES: &[(&str, &str)] = &[
    ("!home:trellis.local", "Home"),
    ("!projects:trellis.local", "Projects"),
    ("!games:trellis.local", "Games"),
];

const ROOMS: &[(&str, &str, RoomStatus)] = &[
    ("!general:trellis.local", "general", RoomStatus::Joined),
    ("!random:trellis.local", "random", RoomStatus::Joined),
    ("!announcements:trellis.local", "announcements", RoomStatus::Invited),
    ("!design:trellis.local", "design", RoomStatus::Joined),
    ("!backend:trellis.local", "backend", RoomStatus::Knocked),
    ("!lobby:trellis.local", "lobby", RoomStatus::Joined),
];

// (parent, child, added_at). The last projects -> home edge is a
// back-reference and gets pruned from the graph.
const EDGES: &[(&str, &str, i64)] = &[
    ("!home:trellis.local", "!general:trellis.local", 1_000),
    ("!home:trellis.local", "!random:trellis.local", 2_000),
    ("!home:trellis.local", "!announcements:trellis.local", 3_000),
    ("!home:trellis.local", "!projects:trellis.local", 4_000),
    ("!projects:trellis.local", "!design:trellis.local", 5_000),
    ("!projects:trellis.local", "!backend:trellis.local", 6_000),
    ("!projects:trellis.local", "!general:trellis.local", 7_000),
    ("!projects:trellis.local", "!home:trellis.local", 8_000),
    ("!games:trellis.local", "!lobby:trellis.local", 9_000),
];

pub async fn seed(State(state): State<AppState>) -> impl IntoResponse {
    if !state.test_mode {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": {
                    "code": "not_found",
                    "message": "not found"
                }
            })),
        );
    }

    match do_seed(&state).await {
        Ok(data) => (StatusCode::OK, Json(json!({ "data": data }))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": {
                    "code": "seed_failed",
                    "message": e.to_string()
                }
            })),
        ),
    }
}

async fn do_seed(state: &AppState) -> Result<serde_json::Value, AppError> {
    let pool = &state.db;

    for (id, name) in SPACES {
        db::rooms::upsert_room(
            pool,
            &NewRoom {
                id: id.to_string(),
                display_name: name.to_string(),
                avatar_url: String::new(),
                is_space: true,
                status: RoomStatus::Joined,
            },
        )
        .await?;
    }

    for (id, name, status) in ROOMS {
        db::rooms::upsert_room(
            pool,
            &NewRoom {
                id: id.to_string(),
                display_name: name.to_string(),
                avatar_url: String::new(),
                is_space: false,
                status: *status,
            },
        )
        .await?;
    }

    for (parent, child, added_at) in EDGES {
        db::spaces::add_child(pool, parent, child, Some(*added_at)).await?;
    }

    let general = "!general:trellis.local";
    for (user_id, name) in [("@alice:trellis.local", "Alice"), ("@bob:trellis.local", "Bob")] {
        db::members::upsert_member(
            pool,
            general,
            &NewMember {
                user_id: user_id.to_string(),
                display_name: Some(name.to_string()),
                avatar_url: None,
                membership: "join".to_string(),
            },
        )
        .await?;
    }

    let already_seeded = !db::messages::list_recent(pool, general, 1).await?.is_empty();
    if !already_seeded {
        let now = chrono::Utc::now().timestamp_millis();
        let script = [
            ("@alice:trellis.local", "welcome to the home space", now - 3_600_000),
            ("@bob:trellis.local", "thanks! where do projects live?", now - 3_000_000),
            ("@alice:trellis.local", "under Projects, one level down", now - 30_000),
        ];
        for (sender, body, ts_ms) in script {
            db::messages::insert_message(
                pool,
                general,
                &NewMessage {
                    sender_id: sender.to_string(),
                    body: body.to_string(),
                    ts_ms,
                },
            )
            .await?;
        }
    }

    tracing::info!("seeded {} spaces and {} rooms", SPACES.len(), ROOMS.len());

    Ok(json!({
        "spaces": SPACES.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
        "rooms": ROOMS.iter().map(|(id, _, _)| *id).collect::<Vec<_>>(),
    }))
}
