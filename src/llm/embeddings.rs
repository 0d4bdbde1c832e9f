//! Embedding generation via Ollama or OpenAI-compatible APIs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::models::NewRecipe;

/// Maximum characters to send per text to the embedding API. A full recipe
/// (title + ingredients + instructions + tags + profile) rarely exceeds a
/// couple of thousand characters, but scraped instruction blocks can balloon
/// when the paragraph fallback fires. 6 000 chars stays comfortably inside
/// an 8 192-token embedding context.
const MAX_EMBED_CHARS: usize = 6_000;

/// Truncate `text` to at most `MAX_EMBED_CHARS`, splitting on a UTF-8 char boundary.
fn truncate_for_embedding(text: &str) -> &str {
    if text.len() <= MAX_EMBED_CHARS {
        return text;
    }
    let mut end = MAX_EMBED_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// The text a recipe is embedded from: every searchable field concatenated,
/// so a mood query can match on tags and flavor profile as much as on the
/// recipe itself.
pub fn recipe_embedding_text(recipe: &NewRecipe) -> String {
    format!(
        "{} {} {} {} {}",
        recipe.title,
        recipe.ingredients.join(" "),
        recipe.instructions,
        recipe.vibe_tags.join(" "),
        recipe.flavor_profile
    )
}

/// Generate embeddings for a batch of texts using the configured provider.
pub async fn embed_batch(
    client: &reqwest::Client,
    config: &LlmConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let truncated: Vec<String> = texts
        .iter()
        .map(|t| truncate_for_embedding(t).to_string())
        .collect();

    match config.provider.as_str() {
        "ollama" => embed_ollama(client, config, &truncated).await,
        "openai" => embed_openai(client, config, &truncated).await,
        other => anyhow::bail!("Unknown LLM provider: {other}"),
    }
}

/// Generate an embedding for a single text.
pub async fn embed_single(
    client: &reqwest::Client,
    config: &LlmConfig,
    text: &str,
) -> Result<Vec<f32>> {
    let results = embed_batch(client, config, &[text.to_string()]).await?;
    results.into_iter().next().context("No embedding returned")
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaEmbedRequest {
    model: String,
    input: Vec<String>,
    /// Ask Ollama to silently truncate inputs that exceed the model's context
    /// length instead of returning a 400 error.
    truncate: bool,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

async fn embed_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    let url = format!("{}/api/embed", config.base_url);

    let batch_size = 32;
    let mut all_embeddings = Vec::new();

    for chunk in texts.chunks(batch_size) {
        let req = OllamaEmbedRequest {
            model: config.embedding_model.clone(),
            input: chunk.to_vec(),
            truncate: true,
        };

        let resp = client
            .post(&url)
            .json(&req)
            .send()
            .await
            .context("Failed to call Ollama embed API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Ollama embed API returned {status}: {body}");
        }

        let body: OllamaEmbedResponse = resp
            .json()
            .await
            .context("Failed to parse Ollama embed response")?;

        all_embeddings.extend(body.embeddings);
    }

    Ok(all_embeddings)
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiEmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct OpenAiEmbedResponse {
    data: Vec<OpenAiEmbedData>,
}

#[derive(Deserialize)]
struct OpenAiEmbedData {
    embedding: Vec<f32>,
}

async fn embed_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    let url = format!("{}/v1/embeddings", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let batch_size = 64;
    let mut all_embeddings = Vec::new();

    for chunk in texts.chunks(batch_size) {
        let req = OpenAiEmbedRequest {
            model: config.embedding_model.clone(),
            input: chunk.to_vec(),
        };

        let resp = client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&req)
            .send()
            .await
            .context("Failed to call OpenAI embed API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI embed API returned {status}: {body}");
        }

        let body: OpenAiEmbedResponse = resp
            .json()
            .await
            .context("Failed to parse OpenAI embed response")?;

        let mut embeddings: Vec<Vec<f32>> = body.data.into_iter().map(|d| d.embedding).collect();
        all_embeddings.append(&mut embeddings);
    }

    Ok(all_embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_for_embedding("short"), "short");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let text = "é".repeat(MAX_EMBED_CHARS); // 2 bytes per char
        let out = truncate_for_embedding(&text);
        assert!(out.len() <= MAX_EMBED_CHARS);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_embedding_text_includes_every_searchable_field() {
        let recipe = NewRecipe {
            title: "Lemon Tart".to_string(),
            ingredients: vec!["3 lemons".to_string()],
            instructions: "Bake until set.".to_string(),
            source: "https://example.com".to_string(),
            vibe_tags: vec!["Bright".to_string()],
            flavor_profile: "Sharp and sweet.".to_string(),
            embedding: Vec::new(),
        };
        let text = recipe_embedding_text(&recipe);
        assert!(text.contains("Lemon Tart"));
        assert!(text.contains("3 lemons"));
        assert!(text.contains("Bake until set."));
        assert!(text.contains("Bright"));
        assert!(text.contains("Sharp and sweet."));
    }
}
