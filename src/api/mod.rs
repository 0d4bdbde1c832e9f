//! Axum HTTP handlers. Each handler composes the extractor, the LLM client
//! and the store in one fixed sequence and maps failures to a status code
//! plus message.

pub mod planner;
pub mod prefs;
pub mod recipes;
pub mod search;
