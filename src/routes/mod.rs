mod health;
pub mod rooms;
mod settings;
pub mod spaces;
mod test_seed;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router: page routes at the root, JSON API
/// under `/api/v1`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/spaces/{space_id}", get(spaces::open_space))
        .route("/test/seed", post(test_seed::seed))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/version", get(health::version))
        // Spaces
        .route("/spaces", get(spaces::list_spaces))
        .route("/spaces/{space_id}/rooms", get(spaces::list_rooms))
        // Rooms
        .route("/rooms/{room_id}/members", get(rooms::list_members))
        .route(
            "/rooms/{room_id}/messages",
            get(rooms::list_messages).post(rooms::send_message),
        )
        // Settings
        .route(
            "/settings/theme",
            get(settings::get_theme).put(settings::update_theme),
        )
}
