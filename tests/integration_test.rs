//! Integration tests for the recipe pipeline.
//!
//! These tests exercise extraction, storage, vector search, and preferences
//! without requiring a running LLM (enrichment and explanations are skipped).

use std::sync::Arc;

use recipe_vibes::extract::html::extract_recipe_from_html;
use recipe_vibes::extract::pdf::parse_recipe_text;
use recipe_vibes::llm::meal_plan::{dedupe_ingredients, CourseSelection};
use recipe_vibes::models::{vibe_match, NewRecipe};
use recipe_vibes::prefs::{JsonFileStore, Preferences};
use recipe_vibes::store::RecipeStore;

/// Helper: an enriched recipe with a hand-picked embedding direction.
fn sample_recipe(title: &str, tags: &[&str], embedding: Vec<f32>) -> NewRecipe {
    NewRecipe {
        title: title.to_string(),
        ingredients: vec![
            "2 cups flour".to_string(),
            "1 cup sugar".to_string(),
            "3 eggs".to_string(),
        ],
        instructions: "Mix everything.\n\nBake at 350F for 30 minutes.".to_string(),
        source: "https://example.com/recipes/1".to_string(),
        vibe_tags: tags.iter().map(|t| t.to_string()).collect(),
        flavor_profile: "Sweet and buttery".to_string(),
        embedding,
    }
}

#[test]
fn test_end_to_end_store_and_vector_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.json");
    let store = RecipeStore::open_or_create(&path).unwrap();

    // Three recipes in three embedding directions
    store
        .insert(sample_recipe("Cozy Stew", &["cozy"], vec![0.9, 0.1, 0.1]))
        .unwrap();
    store
        .insert(sample_recipe("Summer Salad", &["fresh"], vec![0.1, 0.9, 0.1]))
        .unwrap();
    store
        .insert(sample_recipe("Midnight Cake", &["indulgent"], vec![0.1, 0.1, 0.9]))
        .unwrap();

    // Query in the "cozy" direction
    let hits = store.vector_search(&[0.95, 0.05, 0.05], 100, 10);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].recipe.title, "Cozy Stew");

    // Normalized scores are valid match fractions in [0, 1],
    // so vibe-match percentages land in [0, 100].
    for hit in &hits {
        assert!((0.0..=1.0).contains(&hit.score), "score = {}", hit.score);
        assert!(vibe_match(hit.score) <= 100);
    }
    // Results are sorted best-first
    assert!(hits[0].score >= hits[1].score);
    assert!(hits[1].score >= hits[2].score);
}

#[test]
fn test_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.json");

    let id = {
        let store = RecipeStore::open_or_create(&path).unwrap();
        let recipe = store
            .insert(sample_recipe("Cozy Stew", &["cozy"], vec![1.0, 0.0]))
            .unwrap();
        store.close().unwrap();
        recipe.id
    };

    let reopened = RecipeStore::open_or_create(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    let recipe = reopened.find_by_id(&id).unwrap();
    assert_eq!(recipe.title, "Cozy Stew");
    assert_eq!(recipe.embedding, vec![1.0, 0.0]);
}

#[test]
fn test_views_never_expose_embeddings() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecipeStore::open_or_create(&dir.path().join("recipes.json")).unwrap();
    store
        .insert(sample_recipe("Cozy Stew", &["cozy"], vec![1.0, 0.0]))
        .unwrap();

    let views = store.find_all(50);
    assert_eq!(views.len(), 1);
    let json = serde_json::to_value(&views[0]).unwrap();
    assert!(json.get("embedding").is_none());
    assert!(json.get("vibeTags").is_some());
    assert!(json.get("flavorProfile").is_some());
}

#[test]
fn test_tag_overlap_pool_for_substitutes() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecipeStore::open_or_create(&dir.path().join("recipes.json")).unwrap();

    let target = store
        .insert(sample_recipe("Cozy Stew", &["cozy", "hearty"], vec![1.0]))
        .unwrap();
    store
        .insert(sample_recipe("Winter Soup", &["cozy"], vec![1.0]))
        .unwrap();
    store
        .insert(sample_recipe("Summer Salad", &["fresh"], vec![1.0]))
        .unwrap();

    let similar = store.find_by_tag_overlap(&target.vibe_tags, &target.id, 20);
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].title, "Winter Soup");
    // The target itself is excluded even though its tags trivially overlap
    assert!(similar.iter().all(|r| r.id != target.id));
}

#[test]
fn test_html_extraction_end_to_end() {
    let html = r#"
        <html>
          <head><title>Lemon Tart | Best Recipes Ever</title></head>
          <body>
            <h1>Lemon Tart</h1>
            <ul>
              <li itemprop="recipeIngredient">2 cups flour</li>
              <li itemprop="recipeIngredient">1 cup sugar</li>
              <li itemprop="recipeIngredient">3 lemons, juiced</li>
            </ul>
            <ol>
              <li itemprop="recipeInstructions">Combine the flour and sugar in a large bowl until evenly mixed.</li>
              <li itemprop="recipeInstructions">Add the lemon juice and knead into a smooth dough before baking.</li>
            </ol>
          </body>
        </html>
    "#;

    let recipe = extract_recipe_from_html(html, "https://example.com/lemon-tart");
    assert_eq!(recipe.title, "Lemon Tart");
    assert_eq!(recipe.ingredients.len(), 3);
    assert!(recipe.ingredients.contains(&"3 lemons, juiced".to_string()));
    assert!(recipe.instructions.contains("Combine the flour"));
    assert_eq!(recipe.source, "https://example.com/lemon-tart");
}

#[test]
fn test_pdf_text_parse_end_to_end() {
    let text = "Grandma's Apple Pie\n\
                \n\
                Ingredients:\n\
                - 6 apples, peeled and sliced\n\
                - 1 cup sugar\n\
                - 2 tsp cinnamon\n\
                \n\
                Instructions:\n\
                1. Preheat the oven to 375F.\n\
                2. Toss the apples with sugar and cinnamon.\n\
                3. Fill the crust and bake for 50 minutes.\n";

    let recipe = parse_recipe_text(text).unwrap();
    assert_eq!(recipe.title, "Grandma's Apple Pie");
    assert_eq!(recipe.ingredients.len(), 3);
    assert!(recipe.instructions.contains("Preheat the oven"));
    assert_eq!(recipe.source, "PDF Upload");
}

#[test]
fn test_shopping_list_is_deduped_union() {
    let stew = vec![
        "2 cups flour".to_string(),
        "1 onion".to_string(),
        "Salt".to_string(),
    ];
    let salad = vec![
        "1 onion".to_string(),
        "salt".to_string(),
        "3 tomatoes".to_string(),
    ];

    let merged = dedupe_ingredients([stew.as_slice(), salad.as_slice()]);
    // Case-insensitive dedupe keeps the first spelling seen
    assert_eq!(
        merged,
        vec!["2 cups flour", "1 onion", "Salt", "3 tomatoes"]
    );

    // A single recipe's list passes through unchanged
    let single = dedupe_ingredients([stew.as_slice()]);
    assert_eq!(single, stew);
}

#[test]
fn test_course_selection_resolves_within_bounds() {
    // A malformed or missing LLM selection still yields three valid courses
    let fallback = CourseSelection::fallback(7);
    let (a, m, d) = fallback.resolve(7);
    assert!(a < 7 && m < 7 && d < 7);

    // Out-of-range picks clamp to defaults instead of panicking
    let wild = CourseSelection {
        appetizer: 99,
        main: 0,
        dessert: 50,
        explanation: String::new(),
    };
    let (a, m, d) = wild.resolve(5);
    assert!(a < 5 && m < 5 && d < 5);
}

#[test]
fn test_preferences_favorites_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let prefs = Preferences::new(Arc::new(JsonFileStore::open_or_create(&path).unwrap()));

    let id = uuid::Uuid::new_v4();
    assert!(prefs.favorites().is_empty());
    assert!(prefs.toggle_favorite(id).unwrap());
    assert_eq!(prefs.favorites(), vec![id]);
    assert!(!prefs.toggle_favorite(id).unwrap());
    assert!(prefs.favorites().is_empty());

    prefs.record_search("cozy rainy day").unwrap();
    prefs.record_search("summer picnic").unwrap();
    prefs.record_search("COZY rainy day").unwrap();

    // Newest first, case-insensitive dedupe
    let history = prefs.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].query, "COZY rainy day");
    assert_eq!(history[1].query, "summer picnic");

    prefs.clear_history().unwrap();
    assert!(prefs.history().is_empty());

    // Favorites survive reopening the underlying file store
    let other = uuid::Uuid::new_v4();
    prefs.toggle_favorite(other).unwrap();
    let reopened = Preferences::new(Arc::new(JsonFileStore::open_or_create(&path).unwrap()));
    assert_eq!(reopened.favorites(), vec![other]);
}
