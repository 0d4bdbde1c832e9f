//! 3-course meal plan selection and shopping-list categorization.

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::config::LlmConfig;
use crate::llm::client;
use crate::models::Recipe;

/// How many candidate recipes the selection prompt lists.
const SELECTION_POOL: usize = 30;

/// Course picks as 1-based indices into the candidate list.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseSelection {
    pub appetizer: usize,
    pub main: usize,
    pub dessert: usize,
    pub explanation: String,
}

impl CourseSelection {
    /// Typed fallback when the LLM answer is unusable: first, middle and
    /// last of the candidate list.
    pub fn fallback(candidate_count: usize) -> Self {
        Self {
            appetizer: 1,
            main: candidate_count / 2 + 1,
            dessert: candidate_count,
            explanation: "A curated selection of recipes that complement each other and match \
                your mood."
                .to_string(),
        }
    }

    /// Resolve the 1-based picks into 0-based indices, substituting the
    /// fallback position for any index outside `1..=candidate_count`.
    pub fn resolve(&self, candidate_count: usize) -> (usize, usize, usize) {
        let clamp = |pick: usize, default: usize| {
            if (1..=candidate_count).contains(&pick) {
                pick - 1
            } else {
                default
            }
        };
        (
            clamp(self.appetizer, 0),
            clamp(self.main, candidate_count / 2),
            clamp(self.dessert, candidate_count - 1),
        )
    }
}

/// Ask the LLM to pick a cohesive appetizer, main and dessert from the
/// candidates. An unparseable answer degrades to [`CourseSelection::fallback`].
pub async fn select_courses(
    http: &reqwest::Client,
    config: &LlmConfig,
    mood_query: &str,
    candidates: &[Recipe],
) -> Result<CourseSelection> {
    let listing: String = candidates
        .iter()
        .take(SELECTION_POOL)
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {} - Tags: {} - Flavor: {}",
                i + 1,
                r.title,
                r.vibe_tags.join(", "),
                r.flavor_profile
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "You are a professional meal planner. Given these recipes with their vibe tags and \
         flavor profiles, select 3 recipes for a cohesive 3-course meal:\n\
         - 1 appetizer (light, starter)\n\
         - 1 main course (substantial, filling)\n\
         - 1 dessert (sweet, concluding)\n\n\
         The recipes should share the vibe: \"{mood_query}\"\n\
         Consider flavor balance: start light, build to savory, end sweet.\n\n\
         Available recipes:\n{listing}\n\n\
         Respond ONLY with JSON in this exact format (no markdown, no code blocks):\n\
         {{\n  \"appetizer\": 5,\n  \"main\": 12,\n  \"dessert\": 8,\n  \
         \"explanation\": \"Brief explanation of why these 3 recipes work together as a cohesive meal\"\n}}\n\n\
         Use the recipe numbers from the list above."
    );

    let response = client::chat(http, config, None, &prompt, 0.7).await?;

    match client::parse_json_response::<CourseSelection>(&response) {
        Ok(selection) => Ok(selection),
        Err(e) => {
            tracing::warn!("Course selection unparseable, using index fallback: {e}");
            Ok(CourseSelection::fallback(candidates.len().min(SELECTION_POOL)))
        }
    }
}

/// Union several ingredient lists, dropping case-insensitive duplicates
/// while keeping the first-seen spelling and order.
pub fn dedupe_ingredients<'a, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for list in lists {
        for item in list {
            let lowered = item.to_lowercase();
            if !seen.contains(&lowered) {
                seen.push(lowered);
                out.push(item.clone());
            }
        }
    }
    out
}

/// Organize a flat ingredient list into categories (Produce, Proteins, ...).
/// An unparseable answer degrades to a single "Shopping List" category.
pub async fn categorize_shopping_list(
    http: &reqwest::Client,
    config: &LlmConfig,
    items: &[String],
) -> Result<BTreeMap<String, Vec<String>>> {
    let prompt = format!(
        "Organize this shopping list by category (Produce, Proteins, Dairy, Pantry, etc.):\n\n\
         {}\n\n\
         Respond ONLY with JSON in this exact format (no markdown):\n\
         {{\n  \"Produce\": [\"ingredient1\", \"ingredient2\"],\n  \
         \"Proteins\": [\"ingredient3\"],\n  \
         \"Dairy\": [\"ingredient4\"],\n  \
         \"Pantry\": [\"ingredient5\", \"ingredient6\"],\n  \
         \"Other\": [\"ingredient7\"]\n}}",
        items.join("\n")
    );

    let response = client::chat(http, config, None, &prompt, 0.5).await?;

    match client::parse_json_response::<BTreeMap<String, Vec<String>>>(&response) {
        Ok(categorized) => Ok(categorized),
        Err(e) => {
            tracing::warn!("Shopping list categorization unparseable, using flat list: {e}");
            Ok(flat_shopping_list(items))
        }
    }
}

/// Single-category fallback shape.
pub fn flat_shopping_list(items: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();
    map.insert("Shopping List".to_string(), items.to_vec());
    map
}
