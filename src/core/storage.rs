//! Store creation and seeding.
//!
//! On first use the `SQLite` file is created, the four tables are generated from
//! the entity definitions and the configured categories and site settings are
//! inserted. Seeding only ever inserts missing rows, so it can be re-run safely.
//! Other operations open the store without the create flag, so only this
//! module ever brings a store file into existence.

use crate::{
    config::{CatalogConfig, StorePaths, database},
    core::provisioning,
    entities::{Category, SiteSetting, category, site_setting},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait, sea_query::OnConflict,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Outcome of [`ensure_initialized`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// Whether the schema was created by this call
    pub created: bool,
    /// Rows inserted by seeding (zero when the store already existed)
    pub seeded: SeedReport,
}

/// Number of rows inserted by [`seed_initial_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Categories inserted
    pub categories: u64,
    /// Site settings inserted
    pub settings: u64,
}

/// Makes sure the directory tree and the store exist.
///
/// A missing store file is created, its tables defined and seeded; if that
/// fails the file is removed again. An existing file without the tables gets
/// them now. A complete store is left untouched.
#[instrument(skip(catalog))]
pub async fn ensure_initialized(paths: &StorePaths, catalog: &CatalogConfig) -> Result<InitReport> {
    provisioning::ensure_directories(paths, catalog)?;

    if paths.database_file.exists() {
        let db = database::create_connection(paths).await?;
        let outcome = complete_existing_store(&db, paths, catalog).await;
        db.close().await?;
        return outcome;
    }

    if let Some(parent) = paths.database_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    info!(
        "Creating new SQLite database at {}",
        paths.database_file.display()
    );
    let db = database::create_or_open_connection(paths).await?;
    let outcome = initialize_schema(&db, catalog).await;
    let closed: Result<()> = db.close().await.map_err(Into::into);
    let seeded = match (outcome, closed) {
        (Ok(seeded), Ok(())) => seeded,
        (Err(e), _) | (Ok(_), Err(e)) => {
            discard_store_file(paths);
            return Err(e);
        }
    };

    info!(
        "Database schema created, seeded {} categories and {} settings",
        seeded.categories, seeded.settings
    );
    Ok(InitReport {
        created: true,
        seeded,
    })
}

async fn complete_existing_store(
    db: &DatabaseConnection,
    paths: &StorePaths,
    catalog: &CatalogConfig,
) -> Result<InitReport> {
    if database::has_schema(db).await? {
        info!(
            "Using existing SQLite database at {}",
            paths.database_file.display()
        );
        return Ok(InitReport::default());
    }

    warn!(
        "SQLite database at {} has no schema, creating it",
        paths.database_file.display()
    );
    let seeded = initialize_schema(db, catalog).await?;
    Ok(InitReport {
        created: true,
        seeded,
    })
}

fn discard_store_file(paths: &StorePaths) {
    if let Err(e) = std::fs::remove_file(&paths.database_file) {
        warn!(
            "Failed to remove incomplete database {}: {}",
            paths.database_file.display(),
            e
        );
    }
}

/// Creates missing tables and seeds them inside a single transaction.
pub async fn initialize_schema<C>(db: &C, catalog: &CatalogConfig) -> Result<SeedReport>
where
    C: ConnectionTrait + TransactionTrait,
{
    database::create_tables(db).await?;

    let txn = db.begin().await?;
    let seeded = seed_initial_data(&txn, catalog).await?;
    txn.commit().await?;
    Ok(seeded)
}

/// Inserts the configured categories and default settings that are not present yet.
///
/// Existing rows are never overwritten.
pub async fn seed_initial_data<C>(db: &C, catalog: &CatalogConfig) -> Result<SeedReport>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();
    let mut report = SeedReport::default();

    for config in &catalog.categories {
        let row = category::ActiveModel {
            id: Set(config.id.clone()),
            name: Set(config.name.clone()),
            description: Set(Some(config.seed_description())),
            price_range_min: Set(config.min_price()),
            price_range_max: Set(config.max_price()),
            is_active: Set(true),
            created_at: Set(now),
        };
        report.categories += Category::insert(row)
            .on_conflict(
                OnConflict::column(category::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    for setting in &catalog.settings {
        let row = site_setting::ActiveModel {
            key: Set(setting.key.clone()),
            value: Set(Some(setting.value.clone())),
            updated_at: Set(now),
        };
        report.settings += SiteSetting::insert(row)
            .on_conflict(
                OnConflict::column(site_setting::Column::Key)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(report)
}
