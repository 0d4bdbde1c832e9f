//! In-memory recipe store with JSON disk persistence and cosine vector search.
//!
//! The store is constructed once at startup and handed down through
//! `AppState`; every write persists, and `close` does a final flush at
//! shutdown. Recipes are immutable once inserted.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use rand::seq::IndexedRandom;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::models::{NewRecipe, Recipe, RecipeView};

pub struct RecipeStore {
    entries: RwLock<Vec<Recipe>>,
    persist_path: PathBuf,
}

/// A vector-search hit: the matching recipe and its similarity score in [0, 1].
#[derive(Debug, Clone)]
pub struct RecipeHit {
    pub recipe: Recipe,
    pub score: f32,
}

impl RecipeStore {
    pub fn open_or_create(persist_path: &Path) -> Result<Self> {
        if let Some(parent) = persist_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let entries = if persist_path.exists() {
            let data =
                std::fs::read_to_string(persist_path).context("Failed to read recipe store")?;
            serde_json::from_str(&data).unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            persist_path: persist_path.to_path_buf(),
        })
    }

    /// Insert a new recipe, stamping its id and creation timestamp.
    pub fn insert(&self, new: NewRecipe) -> Result<Recipe> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            title: new.title,
            ingredients: new.ingredients,
            instructions: new.instructions,
            source: new.source,
            vibe_tags: new.vibe_tags,
            flavor_profile: new.flavor_profile,
            embedding: new.embedding,
            created_at: chrono::Utc::now(),
        };

        let mut entries = self.entries.write();
        entries.push(recipe.clone());
        self.persist(&entries)?;
        Ok(recipe)
    }

    pub fn find_by_id(&self, id: &Uuid) -> Option<Recipe> {
        self.entries.read().iter().find(|r| &r.id == id).cloned()
    }

    /// All recipes up to `limit`, embeddings stripped.
    pub fn find_all(&self, limit: usize) -> Vec<RecipeView> {
        self.entries
            .read()
            .iter()
            .take(limit)
            .map(RecipeView::from)
            .collect()
    }

    /// One uniformly random recipe, or None when the store is empty.
    pub fn find_random(&self) -> Option<Recipe> {
        self.entries.read().choose(&mut rand::rng()).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Approximate-nearest-neighbor stand-in: score every recipe by cosine
    /// similarity against the query embedding, keep the top `candidates`,
    /// and return the best `limit` of those.
    ///
    /// Raw cosine lands in [-1, 1]; scores are normalized to [0, 1] with
    /// `(1 + cos) / 2`, matching how managed vector-search products report
    /// cosine similarity, so callers can treat them as match fractions.
    pub fn vector_search(
        &self,
        query_embedding: &[f32],
        candidates: usize,
        limit: usize,
    ) -> Vec<RecipeHit> {
        let entries = self.entries.read();

        let mut scored: Vec<(f32, &Recipe)> = entries
            .iter()
            .map(|r| {
                let cos = cosine_similarity(query_embedding, &r.embedding);
                (((1.0 + cos) / 2.0).clamp(0.0, 1.0), r)
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(candidates.min(scored.len()));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(score, r)| RecipeHit {
                recipe: r.clone(),
                score,
            })
            .collect()
    }

    /// Recipes sharing at least one vibe tag with `tags`, excluding
    /// `exclude_id`. Used by the substitute finder.
    pub fn find_by_tag_overlap(
        &self,
        tags: &[String],
        exclude_id: &Uuid,
        limit: usize,
    ) -> Vec<Recipe> {
        self.entries
            .read()
            .iter()
            .filter(|r| &r.id != exclude_id && r.vibe_tags.iter().any(|t| tags.contains(t)))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Final flush. Writes are persisted as they happen; this exists so
    /// shutdown has an explicit lifecycle hook.
    pub fn close(&self) -> Result<()> {
        let entries = self.entries.read();
        self.persist(&entries)
    }

    /// Atomic write via temp file + rename.
    fn persist(&self, entries: &[Recipe]) -> Result<()> {
        let data = serde_json::to_string(entries)?;
        let tmp_path = self.persist_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &data).context("Failed to write recipe store")?;
        std::fs::rename(&tmp_path, &self.persist_path).context("Failed to replace recipe store")?;
        Ok(())
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_recipe(title: &str, tags: &[&str], embedding: Vec<f32>) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            ingredients: vec![format!("main ingredient of {title}")],
            instructions: format!("How to make {title}."),
            source: "https://example.com".to_string(),
            vibe_tags: tags.iter().map(|t| t.to_string()).collect(),
            flavor_profile: format!("{title} profile"),
            embedding,
        }
    }

    fn open_store(dir: &tempfile::TempDir) -> RecipeStore {
        RecipeStore::open_or_create(&dir.path().join("recipes.json")).unwrap()
    }

    #[test]
    fn test_insert_stamps_id_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let recipe = store
            .insert(new_recipe("Tart", &["Bright"], vec![1.0, 0.0]))
            .unwrap();
        assert!(!recipe.id.is_nil());
        assert_eq!(store.find_by_id(&recipe.id).unwrap().title, "Tart");
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let store = open_store(&dir);
            let r = store
                .insert(new_recipe("Soup", &["Cozy"], vec![0.0, 1.0]))
                .unwrap();
            store.close().unwrap();
            r.id
        };

        let store = open_store(&dir);
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(&id).unwrap().title, "Soup");
    }

    #[test]
    fn test_find_all_strips_embedding_and_caps() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        for i in 0..5 {
            store
                .insert(new_recipe(&format!("Recipe {i}"), &[], vec![0.1, 0.2]))
                .unwrap();
        }

        let all = store.find_all(3);
        assert_eq!(all.len(), 3);
        let json = serde_json::to_value(&all[0]).unwrap();
        assert!(json.get("embedding").is_none());
    }

    #[test]
    fn test_find_random_empty_store_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        assert!(store.find_random().is_none());
    }

    #[test]
    fn test_vector_search_orders_by_similarity() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store
            .insert(new_recipe("Close", &[], vec![0.9, 0.1, 0.0]))
            .unwrap();
        store
            .insert(new_recipe("Far", &[], vec![-0.9, -0.1, 0.0]))
            .unwrap();
        store
            .insert(new_recipe("Middle", &[], vec![0.1, 0.9, 0.0]))
            .unwrap();

        let hits = store.vector_search(&[1.0, 0.0, 0.0], 100, 10);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].recipe.title, "Close");
        assert_eq!(hits[2].recipe.title, "Far");
    }

    #[test]
    fn test_vector_search_scores_normalized_to_unit_interval() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store
            .insert(new_recipe("Opposite", &[], vec![-1.0, 0.0]))
            .unwrap();
        store
            .insert(new_recipe("Aligned", &[], vec![1.0, 0.0]))
            .unwrap();

        let hits = store.vector_search(&[1.0, 0.0], 100, 10);
        for hit in &hits {
            assert!((0.0..=1.0).contains(&hit.score), "score {}", hit.score);
        }
        // Anti-parallel vectors score near 0, aligned near 1
        assert!(hits[0].score > 0.99);
        assert!(hits[1].score < 0.01);
    }

    #[test]
    fn test_vector_search_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        for i in 0..10 {
            store
                .insert(new_recipe(&format!("R{i}"), &[], vec![i as f32, 1.0]))
                .unwrap();
        }
        assert_eq!(store.vector_search(&[1.0, 1.0], 100, 4).len(), 4);
    }

    #[test]
    fn test_tag_overlap_excludes_self() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let cozy = store
            .insert(new_recipe("Stew", &["Cozy", "Winter"], vec![0.5]))
            .unwrap();
        store
            .insert(new_recipe("Soup", &["Cozy"], vec![0.5]))
            .unwrap();
        store
            .insert(new_recipe("Salad", &["Fresh"], vec![0.5]))
            .unwrap();

        let similar = store.find_by_tag_overlap(&cozy.vibe_tags, &cozy.id, 20);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].title, "Soup");
    }

    #[test]
    fn test_mismatched_embedding_dims_score_zero() {
        // cosine of mismatched lengths is defined as 0, which normalizes to 0.5
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
