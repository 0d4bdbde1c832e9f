use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::llm::{embeddings, meal_plan, substitute};
use crate::models::{
    vibe_match, MealPlanRequest, MealPlanResponse, RecipeView, ScoredRecipe, ShoppingListRequest,
    ShoppingListResponse, SubstituteRequest,
};
use crate::state::AppState;
use crate::store::RecipeHit;

/// Vector-search pool sizes for meal planning (wider than plain search so
/// the selection prompt has variety to choose from).
const PLAN_CANDIDATES: usize = 100;
const PLAN_LIMIT: usize = 50;

/// How many candidates the selection prompt actually lists.
const PLAN_SELECTION_POOL: usize = 30;

/// Similar recipes consulted for substitute context.
const SUBSTITUTE_POOL: usize = 20;

/// POST /api/recipes/meal-planner - Build a mood-matched 3-course plan with
/// a combined shopping list.
pub async fn meal_planner(
    State(state): State<AppState>,
    Json(req): Json<MealPlanRequest>,
) -> Result<Json<MealPlanResponse>, (StatusCode, String)> {
    let mood_query = req.mood_query.trim().to_string();
    if mood_query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Mood query required".to_string()));
    }

    // Never a partial plan: three courses or an error, checked before
    // spending an embedding call
    if state.store.len() < 3 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Not enough recipes in database to create a meal plan. Please add more recipes."
                .to_string(),
        ));
    }

    let llm_config = state.llm_config.read().clone();
    let query_embedding = embeddings::embed_single(&state.http_client, &llm_config, &mood_query)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Mood embedding failed: {e:#}"),
            )
        })?;

    let hits = state
        .store
        .vector_search(&query_embedding, PLAN_CANDIDATES, PLAN_LIMIT);

    let candidates: Vec<_> = hits
        .iter()
        .take(PLAN_SELECTION_POOL)
        .map(|h| h.recipe.clone())
        .collect();

    let selection =
        meal_plan::select_courses(&state.http_client, &llm_config, &mood_query, &candidates)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Meal plan selection failed: {e:#}"),
                )
            })?;

    let (a, m, d) = selection.resolve(candidates.len());
    let appetizer = &hits[a];
    let main = &hits[m];
    let dessert = &hits[d];

    let items = meal_plan::dedupe_ingredients([
        appetizer.recipe.ingredients.as_slice(),
        main.recipe.ingredients.as_slice(),
        dessert.recipe.ingredients.as_slice(),
    ]);

    let shopping_list =
        meal_plan::categorize_shopping_list(&state.http_client, &llm_config, &items)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Shopping list generation failed: {e:#}"),
                )
            })?;

    Ok(Json(MealPlanResponse {
        appetizer: course_view(appetizer),
        main: course_view(main),
        dessert: course_view(dessert),
        explanation: selection.explanation,
        shopping_list,
        mood_query,
    }))
}

fn course_view(hit: &RecipeHit) -> ScoredRecipe {
    ScoredRecipe {
        recipe: RecipeView::from(&hit.recipe),
        vibe_match: vibe_match(hit.score),
        match_reason: None,
    }
}

/// POST /api/recipes/shopping-list - Consolidated, categorized shopping list
/// for a set of recipes.
pub async fn shopping_list(
    State(state): State<AppState>,
    Json(req): Json<ShoppingListRequest>,
) -> Result<Json<ShoppingListResponse>, (StatusCode, String)> {
    if req.recipe_ids.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "At least one recipe id is required".to_string(),
        ));
    }

    let mut recipes = Vec::with_capacity(req.recipe_ids.len());
    for id in &req.recipe_ids {
        match state.store.find_by_id(id) {
            Some(recipe) => recipes.push(recipe),
            None => {
                return Err((StatusCode::NOT_FOUND, format!("Recipe {id} not found")));
            }
        }
    }

    let items = meal_plan::dedupe_ingredients(recipes.iter().map(|r| r.ingredients.as_slice()));

    let llm_config = state.llm_config.read().clone();
    let shopping_list =
        meal_plan::categorize_shopping_list(&state.http_client, &llm_config, &items)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Shopping list generation failed: {e:#}"),
                )
            })?;

    Ok(Json(ShoppingListResponse {
        recipe_ids: req.recipe_ids,
        shopping_list,
    }))
}

/// POST /api/recipes/substitute - Suggest a substitute for a missing
/// ingredient, informed by same-vibe recipes.
pub async fn find_substitute(
    State(state): State<AppState>,
    Json(req): Json<SubstituteRequest>,
) -> Result<Json<substitute::SubstituteSuggestion>, (StatusCode, String)> {
    let ingredient = req.ingredient.trim().to_string();
    if ingredient.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Ingredient required".to_string()));
    }

    let recipe = state
        .store
        .find_by_id(&req.recipe_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Recipe not found".to_string()))?;

    let similar = state
        .store
        .find_by_tag_overlap(&recipe.vibe_tags, &recipe.id, SUBSTITUTE_POOL);
    let similar_ingredients: Vec<String> = similar
        .iter()
        .flat_map(|r| r.ingredients.iter().cloned())
        .collect();

    let llm_config = state.llm_config.read().clone();
    let suggestion = substitute::find_substitute(
        &state.http_client,
        &llm_config,
        &recipe,
        &similar_ingredients,
        &ingredient,
    )
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Substitute lookup failed: {e:#}"),
        )
    })?;

    Ok(Json(suggestion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        AppState::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_meal_planner_requires_three_recipes() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let result = meal_planner(
            State(state),
            Json(MealPlanRequest {
                mood_query: "cozy autumn evening".to_string(),
            }),
        )
        .await;

        let (status, message) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("Not enough recipes"));
    }

    #[tokio::test]
    async fn test_meal_planner_rejects_blank_mood() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let result = meal_planner(
            State(state),
            Json(MealPlanRequest {
                mood_query: "   ".to_string(),
            }),
        )
        .await;

        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
