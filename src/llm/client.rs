//! Chat-completion plumbing shared by every prompt-templated operation,
//! supporting Ollama and OpenAI-compatible providers.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

/// Send a single-turn chat completion and return the raw response text.
pub async fn chat(
    client: &reqwest::Client,
    config: &LlmConfig,
    system: Option<&str>,
    prompt: &str,
    temperature: f32,
) -> Result<String> {
    match config.provider.as_str() {
        "ollama" => call_ollama(client, config, system, prompt).await,
        "openai" => call_openai(client, config, system, prompt, temperature).await,
        other => anyhow::bail!("Unknown LLM provider: {other}"),
    }
}

/// Parse a JSON value of type `T` out of an LLM response. Strips markdown
/// code fences and surrounding prose, then requires the remaining
/// brace-delimited candidate to deserialize strictly into `T`.
pub fn parse_json_response<T: DeserializeOwned>(content: &str) -> Result<T> {
    let stripped = strip_code_fences(content);
    let candidate = match (stripped.find('{'), stripped.rfind('}')) {
        (Some(start), Some(end)) if start < end => &stripped[start..=end],
        _ => stripped,
    };
    serde_json::from_str(candidate).context("LLM response is not the expected JSON shape")
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Message,
}

async fn call_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    system: Option<&str>,
    prompt: &str,
) -> Result<String> {
    let url = format!("{}/api/chat", config.base_url);

    let mut messages = Vec::new();
    if let Some(system) = system {
        messages.push(Message {
            role: "system".to_string(),
            content: system.to_string(),
        });
    }
    messages.push(Message {
        role: "user".to_string(),
        content: prompt.to_string(),
    });

    let req = OllamaChatRequest {
        model: config.chat_model.clone(),
        messages,
        stream: false,
    };

    let resp = client
        .post(&url)
        .json(&req)
        .send()
        .await
        .context("Failed to call Ollama chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Ollama chat API returned {status}: {body}");
    }

    let body: OllamaChatResponse = resp.json().await?;
    Ok(body.message.content)
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

async fn call_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    system: Option<&str>,
    prompt: &str,
    temperature: f32,
) -> Result<String> {
    let url = format!("{}/v1/chat/completions", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let mut messages = Vec::new();
    if let Some(system) = system {
        messages.push(Message {
            role: "system".to_string(),
            content: system.to_string(),
        });
    }
    messages.push(Message {
        role: "user".to_string(),
        content: prompt.to_string(),
    });

    let req = OpenAiChatRequest {
        model: config.chat_model.clone(),
        messages,
        temperature,
    };

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .context("Failed to call OpenAI chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("OpenAI chat API returned {status}: {body}");
    }

    let body: OpenAiChatResponse = resp.json().await?;
    Ok(body
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .unwrap_or_default())
}
