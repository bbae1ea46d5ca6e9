//! Description generator - fills per-category templates with a product name
//! and its ingredients.

use crate::{config::CatalogConfig, errors::Result};
use serde::Serialize;

/// Tags appended to every suggestion after the name and category.
pub const SIGNATURE_TAGS: [&str; 2] = ["ev yapımı", "taze"];

/// Generated texts for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDescription {
    /// Full description
    pub description: String,
    /// One-line description
    pub short_description: String,
    /// Category display name
    pub category: String,
    /// Lowercased name, category id and the signature tags
    pub suggested_tags: Vec<String>,
}

/// Generates descriptions and tags for a product.
///
/// An empty ingredient list falls back to the configured default phrase.
///
/// # Errors
/// Returns [`crate::errors::Error::InvalidCategory`] if the category is not configured.
pub fn generate_description(
    catalog: &CatalogConfig,
    product_name: &str,
    category_id: &str,
    ingredients: &[String],
) -> Result<ProductDescription> {
    let category = catalog.require_category(category_id)?;
    let texts = &catalog.descriptions;

    let template = category
        .template
        .as_deref()
        .unwrap_or(&texts.fallback_template);
    let ingredients = if ingredients.is_empty() {
        texts.default_ingredients.clone()
    } else {
        ingredients.join(", ")
    };

    let description = fill_template(
        template,
        &[("name", product_name), ("ingredients", ingredients.as_str())],
    );
    let short_description = fill_template(
        &texts.short_template,
        &[("category", category.name.as_str()), ("name", product_name)],
    );

    let mut suggested_tags = vec![product_name.to_lowercase(), category.id.clone()];
    suggested_tags.extend(SIGNATURE_TAGS.iter().map(ToString::to_string));

    Ok(ProductDescription {
        description,
        short_description,
        category: category.name.clone(),
        suggested_tags,
    })
}

/// Replaces `{key}` placeholders in one pass; unknown placeholders are kept verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
