//! Heuristic recipe extraction from PDF text.
//!
//! PDFs carry no structure we can rely on, so this is line-oriented pattern
//! matching: the first non-empty line is taken as the title, section headings
//! are located by regex, and ingredient lines are recognized by bullets,
//! numbering, or unit-of-measure tokens.

use anyhow::{Context, Result};
use regex::Regex;
use std::sync::LazyLock;

use crate::models::ExtractedRecipe;

pub const PDF_SOURCE: &str = "PDF Upload";
pub const INGREDIENTS_PLACEHOLDER: &str =
    "Unable to parse ingredients - please check the PDF manually";
pub const INSTRUCTIONS_PLACEHOLDER: &str =
    "Unable to parse instructions - please check the PDF manually";

static INGREDIENTS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ingredients?|what you need|you will need|materials?):").expect("valid regex")
});

static INSTRUCTIONS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(instructions?|directions?|method|steps?|how to make|preparation):")
        .expect("valid regex")
});

/// A quantity followed by a unit-of-measure token, e.g. "2 cups" or "500g".
static UNIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*(cup|tbsp|tsp|tablespoon|teaspoon|oz|lb|g|kg|ml|l|piece|clove|inch|pound)")
        .expect("valid regex")
});

static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s").expect("valid regex"));

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?\s").expect("valid regex"));

/// Extract a recipe from raw PDF bytes. Text extraction failure or an
/// empty document is a hard error; everything after that is best-effort.
pub fn extract_recipe_from_pdf(bytes: &[u8]) -> Result<ExtractedRecipe> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).context("Failed to extract text from PDF")?;
    parse_recipe_text(&text)
}

/// Parse already-extracted PDF text into recipe fields.
pub fn parse_recipe_text(text: &str) -> Result<ExtractedRecipe> {
    if text.trim().is_empty() {
        anyhow::bail!("PDF appears to be empty or unreadable");
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("No readable text found in PDF");
    }

    // First non-empty line is assumed to be the title
    let title = super::truncate_title(lines[0]);

    let ingredients_idx = lines.iter().position(|l| INGREDIENTS_HEADING.is_match(l));
    let instructions_idx = lines.iter().position(|l| INSTRUCTIONS_HEADING.is_match(l));

    let mut ingredients = match ingredients_idx {
        Some(start) => {
            let end = instructions_idx.unwrap_or(lines.len());
            lines[start + 1..end.max(start + 1)]
                .iter()
                .filter(|l| looks_like_ingredient(l))
                .map(|l| BULLET_PREFIX.replace(l, "").trim().to_string())
                .collect()
        }
        // No heading: take unit-pattern lines from anywhere in the document
        None => lines
            .iter()
            .filter(|l| UNIT_PATTERN.is_match(l))
            .map(|l| l.to_string())
            .collect::<Vec<_>>(),
    };

    let mut instructions = match instructions_idx {
        Some(start) => lines[start + 1..].join("\n"),
        None => match ingredients_idx {
            // Everything after the ingredient block
            Some(start) => {
                let skip = (start + ingredients.len() + 1).min(lines.len());
                lines[skip..].join("\n")
            }
            // Last resort: the entire text
            None => text.to_string(),
        },
    };

    if ingredients.is_empty() {
        ingredients.push(INGREDIENTS_PLACEHOLDER.to_string());
    }
    if instructions.trim().len() < 10 {
        instructions = INSTRUCTIONS_PLACEHOLDER.to_string();
    }

    Ok(ExtractedRecipe {
        title,
        ingredients,
        instructions: instructions.trim().to_string(),
        source: PDF_SOURCE.to_string(),
    })
}

/// A line between the section headings counts as an ingredient when it is a
/// bullet, a numbered item, or contains a quantity-with-unit token.
fn looks_like_ingredient(line: &str) -> bool {
    UNIT_PATTERN.is_match(line) || BULLET_PREFIX.is_match(line) || NUMBERED_PREFIX.is_match(line)
}
