//! # recipe-vibes
//!
//! A Rust web application for collecting recipes and finding them again by
//! mood. Recipes come in through URL scraping or PDF upload, are enriched
//! with AI-generated vibe tags, a flavor profile and a vector embedding, and
//! are retrieved through natural-language "vibe" queries via cosine
//! similarity search.
//!
//! ## Submission pipeline
//!
//! ```text
//!   URL ──fetch──► HTML ──selector chain──┐
//!                                         ├──► {title, ingredients,
//!   PDF ──decode─► text ──line heuristics─┘      instructions, source}
//!                                         │
//!                                         ▼
//!                              LLM enrichment (vibe tags +
//!                              flavor profile; degrades to
//!                              placeholder tags on failure)
//!                                         │
//!                                         ▼
//!                              embedding over all fields
//!                                         │
//!                                         ▼
//!                              RecipeStore (JSON persisted)
//! ```
//!
//! Search embeds the query and scores every stored recipe by normalized
//! cosine similarity; the score surfaces as an integer "vibe match"
//! percentage. Meal planning and ingredient substitution are single
//! prompt-template calls over the same store, each with a strict typed
//! parse of the LLM response and an explicit fallback shape.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, data dir, and LLM settings
//! - [`models`] - Shared data types: `Recipe`, `RecipeView`, request/response types
//! - [`extract`] - Heuristic HTML/PDF recipe field extraction (named strategy chains)
//! - [`llm`] - Chat + embedding clients and the prompt-templated operations
//! - [`store`] - JSON-persisted recipe store with cosine vector search
//! - [`prefs`] - Favorites and search history behind a key-value store trait
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state with explicit open/close lifecycle

pub mod api;
pub mod config;
pub mod extract;
pub mod llm;
pub mod models;
pub mod prefs;
pub mod state;
pub mod store;
