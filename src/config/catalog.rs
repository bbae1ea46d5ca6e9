//! Catalog configuration loading from catalog.toml
//!
//! The catalog file declares the fixed category table (display names, price
//! bands, description templates) and the default site settings. A built-in copy
//! is compiled into the binary; `BUTIK_FIRIN_CATALOG` can point at a replacement
//! file without recompiling the query code.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Environment variable naming an alternative catalog file.
pub const CATALOG_PATH_ENV: &str = "BUTIK_FIRIN_CATALOG";

const BUILTIN_CATALOG: &str = include_str!("../../config/catalog.toml");

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Shared description generator settings
    #[serde(default)]
    pub descriptions: DescriptionConfig,
    /// Category table, in seeding order
    pub categories: Vec<CategoryConfig>,
    /// Default site settings seeded on first run
    #[serde(default)]
    pub settings: Vec<SettingConfig>,
}

/// Configuration for a single category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Slug identifier, also used as the upload subdirectory name
    pub id: String,
    /// Display name
    pub name: String,
    /// Price band as `[min, max]`
    pub price_range: [f64; 2],
    /// Seeded description; defaults to `"<name> kategorisi"`
    #[serde(default)]
    pub description: Option<String>,
    /// Description template with `{name}` and `{ingredients}` placeholders
    #[serde(default)]
    pub template: Option<String>,
}

/// Texts shared by every category in the description generator
#[derive(Debug, Deserialize, Clone)]
pub struct DescriptionConfig {
    /// Used when a category declares no template of its own
    #[serde(default = "default_fallback_template")]
    pub fallback_template: String,
    /// Ingredients phrase used when the caller lists none
    #[serde(default = "default_ingredients")]
    pub default_ingredients: String,
    /// Short description pattern with `{category}` and `{name}` placeholders
    #[serde(default = "default_short_template")]
    pub short_template: String,
}

/// A default site setting
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SettingConfig {
    /// Setting key
    pub key: String,
    /// Setting value
    pub value: String,
}

fn default_fallback_template() -> String {
    "Lezzetli {name}, kaliteli {ingredients} ile hazırlanmış.".to_string()
}

fn default_ingredients() -> String {
    "kaliteli malzemeler".to_string()
}

fn default_short_template() -> String {
    "{category} kategorisinden {name}".to_string()
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            fallback_template: default_fallback_template(),
            default_ingredients: default_ingredients(),
            short_template: default_short_template(),
        }
    }
}

impl CategoryConfig {
    /// Lower bound of the price band
    #[must_use]
    pub const fn min_price(&self) -> f64 {
        self.price_range[0]
    }

    /// Upper bound of the price band
    #[must_use]
    pub const fn max_price(&self) -> f64 {
        self.price_range[1]
    }

    /// Description written to the categories table when seeding
    #[must_use]
    pub fn seed_description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("{} kategorisi", self.name))
    }
}

impl CatalogConfig {
    /// Looks up a configured category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Looks up a configured category, failing with [`Error::InvalidCategory`] if unknown.
    pub fn require_category(&self, id: &str) -> Result<&CategoryConfig> {
        self.category(id).ok_or_else(|| Error::InvalidCategory { id: id.to_string() })
    }

    /// Checks the table for duplicate ids, blank names and inverted price bands.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Config("Catalog declares no categories".to_string()));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.id.trim().is_empty() || category.name.trim().is_empty() {
                return Err(Error::Config(format!(
                    "Category '{}' must have an id and a name",
                    category.id
                )));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(Error::Config(format!(
                    "Duplicate category id '{}'",
                    category.id
                )));
            }
            let [min, max] = category.price_range;
            if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
                return Err(Error::Config(format!(
                    "Category '{}' has an invalid price range [{min}, {max}]",
                    category.id
                )));
            }
        }
        Ok(())
    }
}

/// Parses and validates catalog TOML.
///
/// # Errors
/// Returns an error if the TOML is malformed or fails [`CatalogConfig::validate`].
pub fn parse_catalog(contents: &str) -> Result<CatalogConfig> {
    let catalog: CatalogConfig = toml::from_str(contents)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The category table is inconsistent
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load catalog from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| {
        Error::Config(format!(
            "Failed to read catalog file {}: {e}",
            path_ref.display()
        ))
    })?;
    parse_catalog(&contents)
}

/// The catalog compiled into the binary.
///
/// # Errors
/// Only fails if the embedded file is broken.
pub fn builtin_catalog() -> Result<CatalogConfig> {
    parse_catalog(BUILTIN_CATALOG)
}

/// Loads the catalog named by `BUTIK_FIRIN_CATALOG`, or the built-in one.
pub fn load_default_catalog() -> Result<CatalogConfig> {
    match std::env::var(CATALOG_PATH_ENV) {
        Ok(path) => load_catalog(path),
        Err(_) => builtin_catalog(),
    }
}
