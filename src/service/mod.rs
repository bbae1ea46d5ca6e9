//! Operation surface - the named operations a host process invokes.
//!
//! Each call opens its own connection to the store, runs one piece of core
//! logic and closes the connection before returning. Every outcome, including
//! failures, is returned as a [`Response`] so nothing propagates to the host.

/// Response envelope shared by every operation
pub mod response;

pub use response::Response;

use crate::{
    config::{CatalogConfig, StorePaths, database},
    core::{
        backup::{self, BackupInfo},
        catalog::{self, CategorySummary, ProductSummary},
        description::{self, ProductDescription},
        pricing::{self, PriceSuggestion},
        settings::{self, SettingEntry},
        storage::{self, InitReport},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::instrument;

/// Storefront operations over one installation.
#[derive(Debug, Clone)]
pub struct Storefront {
    paths: StorePaths,
    catalog: CatalogConfig,
}

impl Storefront {
    /// Wraps an installation without touching the filesystem.
    #[must_use]
    pub const fn new(paths: StorePaths, catalog: CatalogConfig) -> Self {
        Self { paths, catalog }
    }

    /// Wraps an installation after making sure its directories and store exist.
    pub async fn open(paths: StorePaths, catalog: CatalogConfig) -> Result<Self> {
        let storefront = Self::new(paths, catalog);
        storefront.ensure_initialized().await?;
        Ok(storefront)
    }

    /// Filesystem layout of this installation.
    #[must_use]
    pub const fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Catalog configuration in use.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    /// Creates directories and the store if missing. Safe to call repeatedly.
    pub async fn ensure_initialized(&self) -> Result<InitReport> {
        storage::ensure_initialized(&self.paths, &self.catalog).await
    }

    /// Creates directories and the store if missing, reporting what was created.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Response<InitReport> {
        self.ensure_initialized().await.into()
    }

    /// Lists active categories ordered by name.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Response<Vec<CategorySummary>> {
        self.with_connection(async |db| catalog::get_categories(db).await)
            .await
            .into()
    }

    /// Lists up to `limit` active products ordered by name, with the row count.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        category_id: Option<&str>,
        limit: u64,
    ) -> Response<Vec<ProductSummary>> {
        let response: Response<Vec<ProductSummary>> = self
            .with_connection(async |db| catalog::get_products(db, category_id, limit).await)
            .await
            .into();
        response.counted()
    }

    /// Suggests a sale price; only the catalog configuration is consulted.
    #[instrument(skip(self))]
    pub fn suggest_pricing(&self, category_id: &str, base_cost: f64) -> Response<PriceSuggestion> {
        pricing::suggest_pricing(&self.catalog, category_id, base_cost).into()
    }

    /// Generates descriptions and tags; only the catalog configuration is consulted.
    #[instrument(skip(self))]
    pub fn generate_description(
        &self,
        product_name: &str,
        category_id: &str,
        ingredients: &[String],
    ) -> Response<ProductDescription> {
        description::generate_description(&self.catalog, product_name, category_id, ingredients)
            .into()
    }

    /// Writes a timestamped snapshot of the store into the backups directory.
    #[instrument(skip(self))]
    pub async fn backup_database(&self) -> Response<BackupInfo> {
        let backups_dir = self.paths.backups_dir.clone();
        self.with_connection(async |db| backup::backup_database(db, &backups_dir).await)
            .await
            .into()
    }

    /// Lists site settings ordered by key.
    #[instrument(skip(self))]
    pub async fn get_site_settings(&self) -> Response<Vec<SettingEntry>> {
        let response: Response<Vec<SettingEntry>> = self
            .with_connection(async |db| settings::list_site_settings(db).await)
            .await
            .into();
        response.counted()
    }

    /// Stores a site setting, creating the key if needed.
    #[instrument(skip(self))]
    pub async fn update_site_setting(&self, key: &str, value: &str) -> Response<SettingEntry> {
        self.with_connection(async |db| settings::set_site_setting(db, key, value).await)
            .await
            .into()
    }

    /// Runs `op` on a fresh connection that is closed before returning.
    ///
    /// The store must already exist; a missing store is reported, not created.
    async fn with_connection<T>(
        &self,
        op: impl AsyncFnOnce(&DatabaseConnection) -> Result<T>,
    ) -> Result<T> {
        let db = database::create_connection(&self.paths).await?;
        let result = op(&db).await;
        let closed = db.close().await;
        let value = result?;
        closed?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::catalog::builtin_catalog;
    use crate::core::product::{NewProduct, create_product};
    use tempfile::TempDir;

    async fn open_storefront() -> Result<(TempDir, Storefront)> {
        crate::test_utils::init_test_tracing();
        let dir = tempfile::tempdir()?;
        let storefront =
            Storefront::open(StorePaths::from_root(dir.path()), builtin_catalog()?).await?;
        Ok((dir, storefront))
    }

    async fn add_products(storefront: &Storefront, products: &[(&str, &str)]) -> Result<()> {
        let db = database::create_connection(storefront.paths()).await?;
        for (name, category_id) in products {
            create_product(&db, NewProduct::new(*name, *category_id, 10.0)).await?;
        }
        db.close().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_reports_creation_once() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storefront = Storefront::new(StorePaths::from_root(dir.path()), builtin_catalog()?);

        let first = storefront.initialize().await;
        let second = storefront.initialize().await;

        let first = first.data.unwrap();
        assert!(first.created);
        assert_eq!(first.seeded.categories, 8);
        assert!(!second.data.unwrap().created);
        Ok(())
    }

    #[tokio::test]
    async fn test_operation_before_initialize_leaves_no_store_behind() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storefront = Storefront::new(StorePaths::from_root(dir.path()), builtin_catalog()?);

        let early = storefront.get_categories().await;
        assert!(!early.success);
        assert!(!storefront.paths().database_file.exists());

        let init = storefront.initialize().await;
        assert!(init.success);
        assert!(init.data.unwrap().created);

        let after = storefront.get_categories().await;
        assert!(after.success);
        assert_eq!(after.data.unwrap().len(), 8);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_categories_response() -> Result<()> {
        let (_dir, storefront) = open_storefront().await?;

        let response = storefront.get_categories().await;

        assert!(response.success);
        assert!(response.error.is_none());
        assert_eq!(response.data.unwrap().len(), 8);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_products_response_has_count() -> Result<()> {
        let (_dir, storefront) = open_storefront().await?;
        add_products(
            &storefront,
            &[("Simit", "ekmekler"), ("Ekmek", "ekmekler"), ("Poğaça", "ekmekler")],
        )
        .await?;

        let response = storefront.get_products(Some("ekmekler"), 2).await;

        assert!(response.success);
        assert_eq!(response.count, Some(2));
        let names: Vec<String> = response.data.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Ekmek", "Poğaça"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_suggest_pricing_envelopes() -> Result<()> {
        let (_dir, storefront) = open_storefront().await?;

        let ok = storefront.suggest_pricing("pastalar", 100.0);
        let failed = storefront.suggest_pricing("unknown-cat", 50.0);

        assert!(ok.success);
        assert_eq!(ok.data.unwrap().profit_margin, 28.6);
        assert!(!failed.success);
        assert!(failed.data.is_none());
        assert_eq!(failed.error.as_deref(), Some("Invalid category: unknown-cat"));
        Ok(())
    }

    #[test]
    fn test_suggest_pricing_never_opens_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = Storefront::new(
            StorePaths::from_root(dir.path().join("absent")),
            builtin_catalog().unwrap(),
        );

        let response = storefront.suggest_pricing("unknown-cat", 50.0);

        assert!(!response.success);
        assert!(!storefront.paths().database_file.exists());
    }

    #[tokio::test]
    async fn test_generate_description_envelope() -> Result<()> {
        let (_dir, storefront) = open_storefront().await?;

        let response = storefront.generate_description(
            "Çikolatalı Kek",
            "kekler-muffinler",
            &["çikolata".to_string(), "un".to_string()],
        );

        let data = response.data.unwrap();
        assert!(data.description.contains("çikolata, un"));
        assert_eq!(data.suggested_tags.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_backup_database_envelope() -> Result<()> {
        let (_dir, storefront) = open_storefront().await?;

        let response = storefront.backup_database().await;

        assert!(response.success);
        let info = response.data.unwrap();
        assert!(info.backup_file.starts_with(&storefront.paths().backups_dir));
        assert!(info.backup_file.exists());
        assert_eq!(info.timestamp.len(), "YYYYMMDD_HHMMSS".len());
        Ok(())
    }

    #[tokio::test]
    async fn test_store_failure_becomes_envelope() -> Result<()> {
        let dir = tempfile::tempdir()?;
        // A directory where the database file should be makes every connection fail.
        let paths = StorePaths::from_root(dir.path());
        std::fs::create_dir_all(&paths.database_file)?;
        let storefront = Storefront::new(paths, builtin_catalog()?);

        let response = storefront.get_categories().await;

        assert!(!response.success);
        assert!(response.error.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_site_settings_round_trip() -> Result<()> {
        let (_dir, storefront) = open_storefront().await?;

        let updated = storefront.update_site_setting("tax_rate", "20.0").await;
        let listed = storefront.get_site_settings().await;

        assert!(updated.success);
        assert_eq!(listed.count, Some(6));
        let tax_rate = listed
            .data
            .unwrap()
            .into_iter()
            .find(|s| s.key == "tax_rate")
            .unwrap();
        assert_eq!(tax_rate.value.as_deref(), Some("20.0"));
        Ok(())
    }
}
