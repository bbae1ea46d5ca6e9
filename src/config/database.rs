//! Database configuration module.
//!
//! This module handles `SQLite` database connections and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::config::paths::StorePaths;
use crate::entities::{Category, Order, Product, SiteSetting};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityName, Schema, Statement, Value,
};
use tracing::debug;

/// Opens a connection to the live store described by `paths`.
///
/// The store file must already exist; a missing file is reported as an error
/// and nothing is created. The `SQLite` driver enables foreign key enforcement
/// on every connection.
pub async fn create_connection(paths: &StorePaths) -> Result<DatabaseConnection> {
    let url = paths.database_url();
    debug!("Connecting to {}", url);
    Database::connect(&url).await.map_err(Into::into)
}

/// Opens a connection to the live store, creating an empty file if it is missing.
pub async fn create_or_open_connection(paths: &StorePaths) -> Result<DatabaseConnection> {
    let url = paths.create_database_url();
    debug!("Connecting to {}", url);
    Database::connect(&url).await.map_err(Into::into)
}

/// Whether every table of the store exists.
pub async fn has_schema<C>(db: &C) -> Result<bool>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    for table in [
        Category.table_name(),
        Product.table_name(),
        Order.table_name(),
        SiteSetting.table_name(),
    ] {
        let found = db
            .query_one(Statement::from_sql_and_values(
                backend,
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                [Value::from(table)],
            ))
            .await?;
        if found.is_none() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Creates all tables that do not exist yet, parents before children.
///
/// Categories are created before products so the product foreign key resolves.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let tables = [
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(SiteSetting),
    ];

    for mut table in tables {
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
    }

    Ok(())
}
