use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::llm::{embeddings, explain};
use crate::models::{vibe_match, RecipeView, ScoredRecipe, SearchRequest, SearchResponse};
use crate::state::AppState;

/// How many top hits get an LLM-written match explanation when the request
/// asks for them.
const EXPLAIN_TOP_N: usize = 3;

/// POST /api/recipes/search - Mood-based semantic search:
///   1. Embed the query
///   2. Cosine vector search over the store
///   3. Convert scores to integer vibe-match percentages
///   4. Optionally explain the top matches
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query required".to_string()));
    }

    tracing::info!("Searching for: {query}");

    let llm_config = state.llm_config.read().clone();
    let query_embedding = embeddings::embed_single(&state.http_client, &llm_config, &query)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Query embedding failed: {e:#}"),
            )
        })?;

    let limit = req.limit.unwrap_or(state.config.search_limit);
    let hits = state
        .store
        .vector_search(&query_embedding, state.config.search_candidates, limit);

    if let Err(e) = state.prefs.record_search(&query) {
        tracing::warn!("Failed to record search history: {e:#}");
    }

    let mut results: Vec<ScoredRecipe> = hits
        .iter()
        .map(|hit| ScoredRecipe {
            recipe: RecipeView::from(&hit.recipe),
            vibe_match: vibe_match(hit.score),
            match_reason: None,
        })
        .collect();

    if req.explain {
        for scored in results.iter_mut().take(EXPLAIN_TOP_N) {
            let reason =
                explain::match_explanation(&state.http_client, &llm_config, &query, &scored.recipe)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!("Match explanation failed for {}: {e:#}", scored.recipe.id);
                        explain::EXPLANATION_FALLBACK.to_string()
                    });
            scored.match_reason = Some(reason);
        }
    }

    Ok(Json(SearchResponse { query, results }))
}
