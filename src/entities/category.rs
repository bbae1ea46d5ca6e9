//! Category entity - Groups products that share a price band and description template.
//!
//! Categories are seeded from the catalog configuration on first run and are
//! otherwise read-only. The string id doubles as the upload subdirectory name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Stable slug identifier (e.g. `"kekler-muffinler"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name shown in the storefront
    pub name: String,
    /// Free-form description of the category
    pub description: Option<String>,
    /// Lower bound of the category price band
    pub price_range_min: f64,
    /// Upper bound of the category price band
    pub price_range_max: f64,
    /// Inactive categories are hidden from listings
    #[sea_orm(default_value = true)]
    pub is_active: bool,
    /// When the category was seeded
    #[sea_orm(default_expr = "sea_orm::sea_query::Expr::current_timestamp()")]
    pub created_at: DateTime,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
