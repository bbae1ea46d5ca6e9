//! Directory provisioning for uploads and backups.
//!
//! The storefront serves product images from `public/uploads/<category-id>/`,
//! so each configured category gets its own subdirectory.

use crate::config::{CatalogConfig, StorePaths};
use crate::errors::Result;
use std::fs;
use tracing::{debug, instrument};

/// Creates the uploads root, the backups root and one upload directory per category.
///
/// Existing directories are left untouched.
#[instrument(skip_all)]
pub fn ensure_directories(paths: &StorePaths, catalog: &CatalogConfig) -> Result<()> {
    fs::create_dir_all(&paths.uploads_dir)?;
    fs::create_dir_all(&paths.backups_dir)?;

    for category in &catalog.categories {
        fs::create_dir_all(paths.uploads_dir.join(&category.id))?;
    }

    debug!(
        "Ensured {} category upload directories under {}",
        catalog.categories.len(),
        paths.uploads_dir.display()
    );
    Ok(())
}
