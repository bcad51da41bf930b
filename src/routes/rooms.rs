use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::message::{NewMessage, Transcript};
use crate::models::user::MemberInfoMinimal;
use crate::state::AppState;

pub const DEFAULT_MESSAGE_LIMIT: i64 = 20;
pub const MAX_MESSAGE_LIMIT: i64 = 100;

#[derive(Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct SendMessage {
    pub sender_id: String,
    pub body: String,
}

pub async fn list_members(
    state: State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::rooms::get_room_row(&state.db, &room_id).await?;
    let rows = db::members::list_joined_members(&state.db, &room_id).await?;
    let members: Vec<MemberInfoMinimal> = rows.iter().map(|m| m.to_info()).collect();
    Ok(Json(serde_json::json!({ "data": members })))
}

pub async fn list_messages(
    state: State<AppState>,
    Path(room_id): Path<String>,
    Query(params): Query<MessagesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::rooms::get_room_row(&state.db, &room_id).await?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_MESSAGE_LIMIT)
        .clamp(1, MAX_MESSAGE_LIMIT);
    let rows = db::messages::list_recent(&state.db, &room_id, limit).await?;
    let transcript = Transcript::from_rows(&rows);
    Ok(Json(serde_json::json!({ "data": transcript })))
}

pub async fn send_message(
    state: State<AppState>,
    Path(room_id): Path<String>,
    Json(input): Json<SendMessage>,
) -> Result<Json<serde_json::Value>, AppError> {
    if input.sender_id.trim().is_empty() {
        return Err(AppError::BadRequest("sender_id is required".to_string()));
    }
    if input.body.trim().is_empty() {
        return Err(AppError::BadRequest("message body is empty".to_string()));
    }
    db::rooms::get_room_row(&state.db, &room_id).await?;

    let message = NewMessage {
        sender_id: input.sender_id,
        body: input.body,
        ts_ms: chrono::Utc::now().timestamp_millis(),
    };
    let id = db::messages::insert_message(&state.db, &room_id, &message).await?;
    tracing::debug!("message {id} sent to {room_id} by {}", message.sender_id);

    Ok(Json(serde_json::json!({
        "data": {
            "id": id,
            "room_id": room_id,
            "sender_id": message.sender_id,
            "body": message.body,
            "ts_ms": message.ts_ms,
        }
    })))
}
