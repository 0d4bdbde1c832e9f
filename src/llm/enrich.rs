//! Vibe tag and flavor profile generation.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::llm::client;
use crate::models::ExtractedRecipe;

const SYSTEM_PROMPT: &str = "You are a culinary expert who understands the emotional and \
     cultural significance of food. Return only valid JSON.";

/// AI-generated mood metadata for a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    pub vibe_tags: Vec<String>,
    pub flavor_profile: String,
}

impl Enrichment {
    /// Default metadata used when the LLM is unreachable or answers with
    /// something that is not the expected JSON shape.
    pub fn fallback() -> Self {
        Self {
            vibe_tags: vec!["Uncategorized".to_string()],
            flavor_profile: "No flavor profile available for this recipe yet.".to_string(),
        }
    }
}

/// Generate vibe tags and a flavor profile for an extracted recipe.
///
/// A transport-level failure bubbles up as an error so the caller can decide
/// to degrade; an unparseable response degrades here to [`Enrichment::fallback`].
pub async fn generate_enrichment(
    http: &reqwest::Client,
    config: &LlmConfig,
    recipe: &ExtractedRecipe,
) -> Result<Enrichment> {
    let prompt = format!(
        "Given this recipe:\n\n\
         Title: {}\n\
         Ingredients: {}\n\
         Instructions: {}\n\n\
         Generate a JSON response with:\n\
         1. \"vibeTags\": 5-7 descriptive vibe tags that capture the emotional and situational \
         context (e.g., \"Cozy\", \"Energizing\", \"Nostalgic\", \"Rainy Day\", \"Comfort Food\", \
         \"Celebration\", \"Quick & Easy\")\n\
         2. \"flavorProfile\": A 2-3 sentence description of the flavor profile and mood this \
         recipe evokes\n\n\
         Return ONLY valid JSON in this format:\n\
         {{\n  \"vibeTags\": [\"tag1\", \"tag2\", \"tag3\"],\n  \"flavorProfile\": \"description here\"\n}}",
        recipe.title,
        recipe.ingredients.join(", "),
        recipe.instructions
    );

    let response = client::chat(http, config, Some(SYSTEM_PROMPT), &prompt, 0.7).await?;

    match client::parse_json_response::<Enrichment>(&response) {
        Ok(enrichment) => Ok(enrichment),
        Err(e) => {
            tracing::warn!("Enrichment response unparseable, using fallback tags: {e}");
            Ok(Enrichment::fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::parse_json_response;

    #[test]
    fn test_enrichment_parses_camel_case_response() {
        let raw = r#"{"vibeTags": ["Cozy", "Rainy Day"], "flavorProfile": "Warm and brothy."}"#;
        let e: Enrichment = parse_json_response(raw).unwrap();
        assert_eq!(e.vibe_tags, vec!["Cozy", "Rainy Day"]);
        assert_eq!(e.flavor_profile, "Warm and brothy.");
    }

    #[test]
    fn test_enrichment_rejects_missing_fields() {
        let raw = r#"{"vibeTags": ["Cozy"]}"#;
        assert!(parse_json_response::<Enrichment>(raw).is_err());
    }

    #[test]
    fn test_fallback_has_placeholder_tag() {
        let e = Enrichment::fallback();
        assert_eq!(e.vibe_tags, vec!["Uncategorized"]);
        assert!(!e.flavor_profile.is_empty());
    }
}
