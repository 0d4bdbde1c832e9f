//! CSS-selector extraction of recipe fields from scraped HTML.
//!
//! Each field has an ordered list of named selector strategies matching
//! conventions common across recipe sites (schema.org microdata, WordPress
//! recipe plugins, hand-rolled class names). The lists are data, not code, so
//! adding a site convention is a one-line change.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::models::ExtractedRecipe;

pub const INGREDIENTS_PLACEHOLDER: &str = "Unable to extract ingredients from this page";
pub const INSTRUCTIONS_PLACEHOLDER: &str = "Unable to extract instructions from this page";

/// A named extraction strategy: one CSS selector tried in order.
struct SelectorStrategy {
    name: &'static str,
    selector: Selector,
}

fn compile(strategies: &[(&'static str, &'static str)]) -> Vec<SelectorStrategy> {
    strategies
        .iter()
        .filter_map(|(name, css)| match Selector::parse(css) {
            Ok(selector) => Some(SelectorStrategy { name, selector }),
            Err(e) => {
                tracing::warn!("Invalid selector for strategy {name}: {e:?}");
                None
            }
        })
        .collect()
}

static TITLE_STRATEGIES: LazyLock<Vec<SelectorStrategy>> = LazyLock::new(|| {
    compile(&[
        ("heading", "h1"),
        ("recipe-title-class", r#"[class*="recipe-title"]"#),
        ("microdata-name", r#"[itemprop="name"]"#),
        ("page-title", "title"),
    ])
});

static INGREDIENT_STRATEGIES: LazyLock<Vec<SelectorStrategy>> = LazyLock::new(|| {
    compile(&[
        ("ingredient-class", r#"[class*="ingredient"]"#),
        ("microdata-ingredient", r#"[itemprop="recipeIngredient"]"#),
        ("ingredients-list", ".ingredients li"),
        ("ingredient-list", ".ingredient-list li"),
        ("data-attribute", "[data-ingredient]"),
        ("ingredient-list-item", r#"li[class*="ingredient"]"#),
    ])
});

static INSTRUCTION_STRATEGIES: LazyLock<Vec<SelectorStrategy>> = LazyLock::new(|| {
    compile(&[
        ("instruction-class", r#"[class*="instruction"]"#),
        ("microdata-instructions", r#"[itemprop="recipeInstructions"]"#),
        ("instructions-container", ".instructions"),
        ("directions-container", ".directions"),
        ("recipe-directions", ".recipe-directions"),
        ("direction-class", r#"[class*="direction"]"#),
        ("step-class", r#"[class*="step"]"#),
    ])
});

static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));

/// Extract a best-effort recipe record from raw HTML. Never fails: fields
/// that no strategy can fill come back as placeholder strings.
pub fn extract_recipe_from_html(html: &str, source_url: &str) -> ExtractedRecipe {
    let doc = Html::parse_document(html);

    let title = extract_title(&doc);
    let ingredients = extract_ingredients(&doc);
    let instructions = extract_instructions(&doc);

    ExtractedRecipe {
        title,
        ingredients,
        instructions,
        source: source_url.to_string(),
    }
}

fn element_text(el: scraper::ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// First strategy that yields non-empty text wins.
fn extract_title(doc: &Html) -> String {
    for strategy in TITLE_STRATEGIES.iter() {
        if let Some(el) = doc.select(&strategy.selector).next() {
            let text = element_text(el);
            if !text.is_empty() {
                tracing::debug!(strategy = strategy.name, "title matched");
                return super::truncate_title(&clean_title(&text));
            }
        }
    }
    "Untitled Recipe".to_string()
}

/// Strip trailing site-name suffixes, split on `|` then `-`.
fn clean_title(title: &str) -> String {
    title
        .split('|')
        .next()
        .unwrap_or(title)
        .split('-')
        .next()
        .unwrap_or(title)
        .trim()
        .to_string()
}

/// Union of all strategies: each match is trimmed, very short matches are
/// dropped, and duplicates across strategies are removed preserving order.
fn extract_ingredients(doc: &Html) -> Vec<String> {
    let mut ingredients: Vec<String> = Vec::new();

    for strategy in INGREDIENT_STRATEGIES.iter() {
        let before = ingredients.len();
        for el in doc.select(&strategy.selector) {
            let text = element_text(el);
            if text.len() > 2 && !ingredients.contains(&text) {
                ingredients.push(text);
            }
        }
        if ingredients.len() > before {
            tracing::debug!(
                strategy = strategy.name,
                added = ingredients.len() - before,
                "ingredients matched"
            );
        }
    }

    if ingredients.is_empty() {
        ingredients.push(INGREDIENTS_PLACEHOLDER.to_string());
    }
    ingredients
}

/// Concatenate instruction-like blocks over a minimum length. If the
/// selector strategies produce too little text, fall back to every paragraph
/// over 50 characters.
fn extract_instructions(doc: &Html) -> String {
    let mut instructions = String::new();

    for strategy in INSTRUCTION_STRATEGIES.iter() {
        for el in doc.select(&strategy.selector) {
            let text = element_text(el);
            if text.len() > 20 {
                instructions.push_str(&text);
                instructions.push_str("\n\n");
            }
        }
    }

    if instructions.trim().len() < 50 {
        tracing::debug!(strategy = "all-paragraphs", "instructions fallback");
        for el in doc.select(&PARAGRAPH_SELECTOR) {
            let text = element_text(el);
            if text.len() > 50 {
                instructions.push_str(&text);
                instructions.push_str("\n\n");
            }
        }
    }

    let trimmed = instructions.trim();
    if trimmed.len() > 20 {
        trimmed.to_string()
    } else {
        INSTRUCTIONS_PLACEHOLDER.to_string()
    }
}
