//! Context-aware ingredient substitution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::llm::client;
use crate::models::Recipe;

const SYSTEM_PROMPT: &str = "You are a culinary expert who understands ingredient substitutions \
     and recipe compatibility. Return only valid JSON.";

/// A substitution suggestion for a missing ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstituteSuggestion {
    pub substitute: String,
    /// 1-2 sentence explanation of why this works in context
    pub reason: String,
    /// "high", "medium" or "low"
    pub confidence: String,
}

/// Suggest a substitute for `missing_ingredient`, informed by ingredients
/// drawn from recipes sharing the same vibe tags. Unlike enrichment, an
/// unparseable response is a hard error here: there is no sensible default
/// substitute to hand back.
pub async fn find_substitute(
    http: &reqwest::Client,
    config: &LlmConfig,
    recipe: &Recipe,
    similar_ingredients: &[String],
    missing_ingredient: &str,
) -> Result<SubstituteSuggestion> {
    let prompt = format!(
        "A user is making this recipe: \"{}\"\n\
         Vibe: {}\n\
         They are missing: {missing_ingredient}\n\n\
         From similar recipes with the same vibe, here are ingredients used: {}\n\n\
         Suggest the best substitute for \"{missing_ingredient}\" in this context. Consider:\n\
         1. Similar recipes that share the same vibe\n\
         2. Dietary restrictions (if it's vegan, suggest vegan alternatives)\n\
         3. The flavor profile and texture match\n\n\
         Return a JSON response:\n\
         {{\n  \"substitute\": \"ingredient name\",\n  \
         \"reason\": \"1-2 sentence explanation why this works in this context\",\n  \
         \"confidence\": \"high/medium/low\"\n}}",
        recipe.title,
        recipe.vibe_tags.join(", "),
        similar_ingredients.join(", ")
    );

    let response = client::chat(http, config, Some(SYSTEM_PROMPT), &prompt, 0.7).await?;
    client::parse_json_response(&response).context("Invalid substitute response")
}
