//! Product entity - A bakery item listed in the storefront catalog.
//!
//! Image references and tags are stored as JSON arrays in text columns;
//! use [`Model::image_list`] and [`Model::tag_list`] to decode them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Name of the product (e.g., "Çikolatalı Kek")
    pub name: String,
    /// URL-safe unique handle derived from the name
    #[sea_orm(unique)]
    pub slug: String,
    /// Long description
    pub description: Option<String>,
    /// One-line description for listings
    pub short_description: Option<String>,
    /// Sale price, always positive
    pub price: f64,
    /// Optional "was" price shown struck through
    pub compare_price: Option<f64>,
    /// Category this product belongs to
    pub category_id: String,
    /// Units on hand
    #[sea_orm(default_value = 0)]
    pub stock_quantity: i32,
    /// Stock keeping unit, unique when present
    #[sea_orm(unique)]
    pub sku: Option<String>,
    /// Inactive products are hidden from listings
    #[sea_orm(default_value = true)]
    pub is_active: bool,
    /// Featured products are highlighted on the home page
    #[sea_orm(default_value = false)]
    pub is_featured: bool,
    /// JSON array of image references
    pub images: Option<String>,
    /// JSON array of tags
    pub tags: Option<String>,
    /// Ingredients text
    pub ingredients: Option<String>,
    /// Allergen warnings
    pub allergens: Option<String>,
    /// Shelf life in days
    pub shelf_life_days: Option<i32>,
    /// When the product was created
    #[sea_orm(default_expr = "sea_orm::sea_query::Expr::current_timestamp()")]
    pub created_at: DateTime,
    /// When the product was last modified
    #[sea_orm(default_expr = "sea_orm::sea_query::Expr::current_timestamp()")]
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decodes the stored image references. A missing or blank column is an empty list.
    ///
    /// # Errors
    /// Returns an error if the column holds malformed JSON.
    pub fn image_list(&self) -> serde_json::Result<Vec<String>> {
        decode_list(self.images.as_deref())
    }

    /// Decodes the stored tags. A missing or blank column is an empty list.
    ///
    /// # Errors
    /// Returns an error if the column holds malformed JSON.
    pub fn tag_list(&self) -> serde_json::Result<Vec<String>> {
        decode_list(self.tags.as_deref())
    }
}

fn decode_list(raw: Option<&str>) -> serde_json::Result<Vec<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json),
    }
}
