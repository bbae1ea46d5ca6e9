//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::catalog::builtin_catalog,
    core::{
        product::{self, NewProduct},
        storage,
    },
    entities::{Product, product as product_entity},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an in-memory database seeded from the built-in catalog.
pub async fn setup_seeded_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = setup_test_db().await?;
    storage::seed_initial_data(&db, &builtin_catalog()?).await?;
    Ok(db)
}

/// Creates an active test product with a price of 10.0.
pub async fn create_test_product<C>(
    db: &C,
    name: &str,
    category_id: &str,
) -> Result<product_entity::Model>
where
    C: ConnectionTrait,
{
    product::create_product(db, NewProduct::new(name, category_id, 10.0)).await
}

/// Hides a product from listings.
pub async fn deactivate_product<C>(db: &C, product_id: &str) -> Result<product_entity::Model>
where
    C: ConnectionTrait,
{
    let mut model: product_entity::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::InvalidProduct(format!("No product with id {product_id}")))?
        .into();
    model.is_active = Set(false);
    model.update(db).await.map_err(Into::into)
}
