use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use base64::Engine;
use uuid::Uuid;

use crate::llm::{embeddings, enrich};
use crate::models::{
    ExtractedRecipe, NewRecipe, RecipeView, ScrapeRequest, ScrapeResponse,
};
use crate::state::AppState;

/// POST /api/recipes/scrape - Submit a recipe by URL or base64 PDF payload.
/// Pipeline: extract fields, enrich with vibe tags (degrading to defaults),
/// embed, insert.
pub async fn scrape(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, (StatusCode, String)> {
    let extracted = if let Some(url) = req.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    {
        tracing::info!("Scraping recipe from URL: {url}");
        scrape_from_url(&state, url).await?
    } else if let Some(pdf_b64) = req.pdf_buffer.as_deref().filter(|b| !b.is_empty()) {
        tracing::info!("Extracting recipe from uploaded PDF");
        extract_from_pdf(pdf_b64).await?
    } else {
        return Err((StatusCode::BAD_REQUEST, "URL or PDF required".to_string()));
    };

    let llm_config = state.llm_config.read().clone();

    // Enrichment degrades to placeholder tags; a recipe submission never
    // fails because the tag generator is down.
    let enrichment =
        match enrich::generate_enrichment(&state.http_client, &llm_config, &extracted).await {
            Ok(enrichment) => enrichment,
            Err(e) => {
                tracing::warn!("Enrichment failed, using fallback tags: {e:#}");
                enrich::Enrichment::fallback()
            }
        };

    let mut new_recipe = NewRecipe {
        title: extracted.title,
        ingredients: extracted.ingredients,
        instructions: extracted.instructions,
        source: extracted.source,
        vibe_tags: enrichment.vibe_tags,
        flavor_profile: enrichment.flavor_profile,
        embedding: Vec::new(),
    };

    let embed_text = embeddings::recipe_embedding_text(&new_recipe);
    new_recipe.embedding =
        embeddings::embed_single(&state.http_client, &llm_config, &embed_text)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Embedding failed: {e:#}"),
                )
            })?;

    let recipe = state.store.insert(new_recipe).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to save recipe: {e:#}"),
        )
    })?;

    tracing::info!("Recipe {} saved as {}", recipe.title, recipe.id);

    Ok(Json(ScrapeResponse {
        success: true,
        recipe_id: recipe.id,
        recipe: RecipeView::from(&recipe),
    }))
}

/// Fetch a recipe page and run the HTML field extractor over it.
async fn scrape_from_url(
    state: &AppState,
    url: &str,
) -> Result<ExtractedRecipe, (StatusCode, String)> {
    let url = normalize_url(url);

    let timeout = std::time::Duration::from_secs(state.config.scrape_timeout_secs);
    let response = tokio::time::timeout(timeout, state.http_client.get(&url).send())
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Fetching {url} timed out after {}s",
                    state.config.scrape_timeout_secs
                ),
            )
        })?
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch URL: {e}"),
            )
        })?;

    if !response.status().is_success() {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch URL: {}", response.status()),
        ));
    }

    let html = response.text().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to read page body: {e}"),
        )
    })?;

    if html.trim().is_empty() {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "URL returned empty content".to_string(),
        ));
    }

    // The HTML DOM is !Send, so extraction runs inside the blocking closure
    let url_owned = url.clone();
    tokio::task::spawn_blocking(move || {
        crate::extract::extract_recipe_from_html(&html, &url_owned)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Extraction task failed: {e}"),
        )
    })
}

/// Decode the base64 payload and run the PDF extractor.
async fn extract_from_pdf(pdf_b64: &str) -> Result<ExtractedRecipe, (StatusCode, String)> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(pdf_b64.trim())
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid base64 PDF payload: {e}"),
            )
        })?;

    tokio::task::spawn_blocking(move || crate::extract::extract_recipe_from_pdf(&bytes))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Extraction task failed: {e}"),
            )
        })?
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to extract recipe from PDF: {e:#}"),
            )
        })
}

/// Prefix bare hostnames with https://.
fn normalize_url(url: &str) -> String {
    let lowered = url.to_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// GET /api/recipes - List recipes (capped, embeddings stripped)
pub async fn list_recipes(State(state): State<AppState>) -> Json<Vec<RecipeView>> {
    Json(state.store.find_all(state.config.list_limit))
}

/// GET /api/recipes/random - One random recipe
pub async fn random_recipe(
    State(state): State<AppState>,
) -> Result<Json<RecipeView>, (StatusCode, String)> {
    match state.store.find_random() {
        Some(recipe) => Ok(Json(RecipeView::from(&recipe))),
        None => Err((StatusCode::NOT_FOUND, "No recipes yet".to_string())),
    }
}

/// GET /api/recipes/:id - Fetch a single recipe
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeView>, (StatusCode, String)> {
    match state.store.find_by_id(&id) {
        Some(recipe) => Ok(Json(RecipeView::from(&recipe))),
        None => Err((StatusCode::NOT_FOUND, "Recipe not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_adds_protocol() {
        assert_eq!(
            normalize_url("example.com/tart"),
            "https://example.com/tart"
        );
    }

    #[test]
    fn test_normalize_url_keeps_existing_protocol() {
        assert_eq!(
            normalize_url("http://example.com/tart"),
            "http://example.com/tart"
        );
        assert_eq!(
            normalize_url("HTTPS://example.com/tart"),
            "HTTPS://example.com/tart"
        );
    }
}
