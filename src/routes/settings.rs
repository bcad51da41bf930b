use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::theme::memory::RootState;
use crate::theme::{
    ClientHints, InvalidThemeMode, JsonFileStore, PresentationRoot, ThemeManager, ThemeMode,
};

type RequestThemeManager = ThemeManager<Arc<JsonFileStore>, ClientHints, PresentationRoot>;

#[derive(Deserialize)]
pub struct UpdateTheme {
    pub mode: String,
}

fn theme_response(mode: ThemeMode, applied: RootState) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "data": {
            "mode": mode,
            "dark": applied.dark,
            "color_scheme": applied.color_scheme,
        }
    }))
}

/// Runs `f` against a theme manager on the blocking pool. The preferences
/// file is read and written synchronously.
async fn with_manager<F>(
    state: &AppState,
    headers: &HeaderMap,
    f: F,
) -> Result<(ThemeMode, RootState), AppError>
where
    F: FnOnce(&RequestThemeManager) -> ThemeMode + Send + 'static,
{
    let preferences = Arc::clone(&state.preferences);
    let hints = ClientHints::from_headers(headers);
    tokio::task::spawn_blocking(move || {
        let manager = ThemeManager::new(preferences, hints, PresentationRoot::new());
        let mode = f(&manager);
        (mode, manager.sink().snapshot())
    })
    .await
    .map_err(|e| AppError::Internal(format!("theme task failed: {e}")))
}

/// Stored theme, resolved against the requesting browser's color-scheme hint.
pub async fn get_theme(
    state: State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let (mode, applied) = with_manager(&state, &headers, |manager| {
        let mode = manager.get_stored_theme();
        manager.apply_theme(mode);
        mode
    })
    .await?;
    Ok(theme_response(mode, applied))
}

/// Persists the requested mode. The response carries whatever the store
/// holds afterwards, which is `system` when the write could not happen.
pub async fn update_theme(
    state: State<AppState>,
    headers: HeaderMap,
    Json(input): Json<UpdateTheme>,
) -> Result<Json<serde_json::Value>, AppError> {
    let requested: ThemeMode = input
        .mode
        .parse()
        .map_err(|e: InvalidThemeMode| AppError::BadRequest(e.to_string()))?;

    let (mode, applied) = with_manager(&state, &headers, move |manager| {
        manager.set_stored_theme(requested);
        let mode = manager.get_stored_theme();
        manager.apply_theme(mode);
        mode
    })
    .await?;

    if mode == requested {
        tracing::info!("theme preference set to {mode}");
    } else {
        tracing::warn!("theme preference {requested} was not persisted, store holds {mode}");
    }
    Ok(theme_response(mode, applied))
}
