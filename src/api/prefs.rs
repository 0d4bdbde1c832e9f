use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::models::RecipeView;
use crate::prefs::HistoryEntry;
use crate::state::AppState;

/// GET /api/favorites - Favorited recipes, stale ids skipped
pub async fn list_favorites(State(state): State<AppState>) -> Json<Vec<RecipeView>> {
    let favorites = state
        .prefs
        .favorites()
        .iter()
        .filter_map(|id| state.store.find_by_id(id))
        .map(|r| RecipeView::from(&r))
        .collect();
    Json(favorites)
}

#[derive(serde::Serialize)]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub favorite: bool,
}

/// POST /api/favorites/:id - Toggle a recipe's favorite status
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteResponse>, (StatusCode, String)> {
    if state.store.find_by_id(&id).is_none() {
        return Err((StatusCode::NOT_FOUND, "Recipe not found".to_string()));
    }

    let favorite = state.prefs.toggle_favorite(id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update favorites: {e:#}"),
        )
    })?;

    Ok(Json(FavoriteResponse { id, favorite }))
}

/// GET /api/history - Recent searches, newest first
pub async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.prefs.history())
}

/// DELETE /api/history - Forget all recorded searches
pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.prefs.clear_history().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to clear history: {e:#}"),
        )
    })?;
    Ok(StatusCode::NO_CONTENT)
}
