use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::navigation::Navigation;
use crate::spaces::load_hierarchy;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RoomsQuery {
    pub depth: Option<u32>,
}

pub async fn list_spaces(state: State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let hierarchy = load_hierarchy(&state.db).await?;
    let spaces = hierarchy.top_level_spaces();
    Ok(Json(serde_json::json!({ "data": spaces })))
}

pub async fn list_rooms(
    state: State<AppState>,
    Path(space_id): Path<String>,
    Query(params): Query<RoomsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let hierarchy = load_hierarchy(&state.db).await?;
    let rooms = hierarchy
        .rooms_in(&space_id, params.depth.unwrap_or(1))
        .ok_or_else(|| AppError::NotFound("unknown_space".to_string()))?;
    Ok(Json(serde_json::json!({ "data": rooms })))
}

/// Page route for a bare space: sends the client to the space's default room
/// when one is known, otherwise lets the page render its own fallback.
pub async fn open_space(
    state: State<AppState>,
    Path(space_id): Path<String>,
) -> Result<Response, AppError> {
    let navigation = match Navigation::for_space(&space_id, &state.default_rooms) {
        Navigation::Render => {
            let hierarchy = load_hierarchy(&state.db).await?;
            Navigation::to_room(&space_id, hierarchy.default_room(&space_id))
        }
        redirect => redirect,
    };

    match navigation {
        Navigation::Redirect(path) => {
            tracing::debug!("redirecting space {space_id} to {path}");
            Ok((StatusCode::FOUND, [(LOCATION, path)]).into_response())
        }
        Navigation::Render => Ok(Json(serde_json::json!({
            "data": { "space_id": space_id, "room_id": null }
        }))
        .into_response()),
    }
}
