//! Site setting entity - Key-value pairs for storefront-wide settings.
//! Seeded with defaults (site name, currency, tax rate, ...) on first run.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Site setting database model - stores key-value configuration pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    /// Setting key (e.g., `"currency_symbol"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Setting value stored as string
    pub value: Option<String>,
    /// When this setting was last modified
    #[sea_orm(default_expr = "sea_orm::sea_query::Expr::current_timestamp()")]
    pub updated_at: DateTime,
}

/// `SiteSetting` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
