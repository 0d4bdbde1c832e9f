use axum::routing::{delete, get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use recipe_vibes::api;
use recipe_vibes::config::Config;
use recipe_vibes::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.base_url);

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/recipes", get(api::recipes::list_recipes))
        .route("/api/recipes/scrape", post(api::recipes::scrape))
        .route("/api/recipes/search", post(api::search::search))
        .route("/api/recipes/random", get(api::recipes::random_recipe))
        .route("/api/recipes/meal-planner", post(api::planner::meal_planner))
        .route("/api/recipes/shopping-list", post(api::planner::shopping_list))
        .route("/api/recipes/substitute", post(api::planner::find_substitute))
        .route("/api/recipes/{id}", get(api::recipes::get_recipe))
        .route("/api/favorites", get(api::prefs::list_favorites))
        .route("/api/favorites/{id}", post(api::prefs::toggle_favorite))
        .route("/api/history", get(api::prefs::list_history))
        .route("/api/history", delete(api::prefs::clear_history))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.close();
    Ok(())
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
}
