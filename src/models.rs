use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A stored recipe, including its embedding. This is the persisted shape;
/// API responses use [`RecipeView`] so the embedding never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// Source URL, or "PDF Upload" for uploaded documents
    pub source: String,
    pub vibe_tags: Vec<String>,
    pub flavor_profile: String,
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

/// A recipe as returned to clients: everything except the embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub source: String,
    pub vibe_tags: Vec<String>,
    pub flavor_profile: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Recipe> for RecipeView {
    fn from(r: &Recipe) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            ingredients: r.ingredients.clone(),
            instructions: r.instructions.clone(),
            source: r.source.clone(),
            vibe_tags: r.vibe_tags.clone(),
            flavor_profile: r.flavor_profile.clone(),
            created_at: r.created_at,
        }
    }
}

/// A fully enriched recipe ready for insertion; the store stamps the id
/// and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub source: String,
    pub vibe_tags: Vec<String>,
    pub flavor_profile: String,
    pub embedding: Vec<f32>,
}

/// Raw fields produced by the extractor, before AI enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub source: String,
}

/// A search result: recipe projection plus its vibe-match percentage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: RecipeView,
    /// Similarity score converted to an integer percentage
    pub vibe_match: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_reason: Option<String>,
}

/// Convert a similarity score in [0, 1] to an integer vibe-match percentage.
/// Out-of-range scores are clamped so the result always lands in [0, 100].
pub fn vibe_match(score: f32) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Scrape/upload request: exactly one of `url` or `pdf_buffer` is expected.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub url: Option<String>,
    /// Base64-encoded PDF bytes
    pub pdf_buffer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub success: bool,
    pub recipe_id: Uuid,
    pub recipe: RecipeView,
}

/// Mood search request
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub limit: Option<usize>,
    /// When set, generate match explanations for the top results
    #[serde(default)]
    pub explain: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ScoredRecipe>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstituteRequest {
    pub recipe_id: Uuid,
    pub ingredient: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub mood_query: String,
}

/// A 3-course meal plan. Ephemeral, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub appetizer: ScoredRecipe,
    pub main: ScoredRecipe,
    pub dessert: ScoredRecipe,
    pub explanation: String,
    pub shopping_list: BTreeMap<String, Vec<String>>,
    pub mood_query: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListRequest {
    pub recipe_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResponse {
    pub recipe_ids: Vec<Uuid>,
    pub shopping_list: BTreeMap<String, Vec<String>>,
}
