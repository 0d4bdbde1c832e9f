//! Clients for the external LLM API: chat completions and embeddings, plus
//! the prompt-templated operations built on them (enrichment, match
//! explanations, substitutions, meal planning).

pub mod client;
pub mod embeddings;
pub mod enrich;
pub mod explain;
pub mod meal_plan;
pub mod substitute;
