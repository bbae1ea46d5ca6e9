/// Catalog configuration loading from catalog.toml
pub mod catalog;

/// Database connection management and table creation
pub mod database;

/// Filesystem layout of the store, uploads and backups
pub mod paths;

pub use catalog::{CatalogConfig, CategoryConfig, load_default_catalog};
pub use paths::StorePaths;
