//! Natural-language explanations for why a search hit matches a mood query.

use anyhow::Result;

use crate::config::LlmConfig;
use crate::llm::client;
use crate::models::RecipeView;

/// Canned explanation used when the LLM cannot be reached.
pub const EXPLANATION_FALLBACK: &str = "This recipe matches your vibe perfectly!";

const SYSTEM_PROMPT: &str = "You are a warm, knowledgeable food curator who understands the \
     emotional connections people have with food.";

/// Explain in 1-2 sentences why `recipe` suits the user's query.
pub async fn match_explanation(
    http: &reqwest::Client,
    config: &LlmConfig,
    query: &str,
    recipe: &RecipeView,
) -> Result<String> {
    let prompt = format!(
        "A user searched for: \"{query}\"\n\n\
         We matched them with this recipe:\n\
         Title: {}\n\
         Vibe Tags: {}\n\
         Flavor Profile: {}\n\n\
         In 1-2 sentences, explain why this recipe is a great match for their search. \
         Be warm, conversational, and specific about the emotional/situational connection.",
        recipe.title,
        recipe.vibe_tags.join(", "),
        recipe.flavor_profile
    );

    let response = client::chat(http, config, Some(SYSTEM_PROMPT), &prompt, 0.8).await?;
    Ok(response.trim().to_string())
}
