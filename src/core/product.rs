//! Product business logic - creation and lookup of catalog products.
//!
//! Creation enforces the product invariants the schema cannot express on its
//! own: the price must be positive and the category must exist. Ids are random
//! UUIDs and slugs are derived from the product name.

use crate::{
    entities::{Category, Product, product},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;
use uuid::Uuid;

/// Input for [`create_product`]. Start from [`NewProduct::new`] and adjust fields as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Owning category id
    pub category_id: String,
    /// Sale price, must be positive
    pub price: f64,
    /// Optional "was" price
    pub compare_price: Option<f64>,
    /// Long description
    pub description: Option<String>,
    /// One-line description
    pub short_description: Option<String>,
    /// Units on hand
    pub stock_quantity: i32,
    /// Stock keeping unit
    pub sku: Option<String>,
    /// Listed in the storefront
    pub is_active: bool,
    /// Highlighted on the home page
    pub is_featured: bool,
    /// Image references
    pub images: Vec<String>,
    /// Tags
    pub tags: Vec<String>,
    /// Ingredients text
    pub ingredients: Option<String>,
    /// Allergen warnings
    pub allergens: Option<String>,
    /// Shelf life in days
    pub shelf_life_days: Option<i32>,
}

impl NewProduct {
    /// An active, unfeatured product with no stock and no optional details.
    #[must_use]
    pub fn new(name: impl Into<String>, category_id: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category_id: category_id.into(),
            price,
            compare_price: None,
            description: None,
            short_description: None,
            stock_quantity: 0,
            sku: None,
            is_active: true,
            is_featured: false,
            images: Vec::new(),
            tags: Vec::new(),
            ingredients: None,
            allergens: None,
            shelf_life_days: None,
        }
    }
}

/// Derives a URL handle: Turkish letters folded to ASCII, everything else
/// non-alphanumeric collapsed into single dashes.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        let folded = match ch {
            'ç' | 'Ç' => 'c',
            'ğ' | 'Ğ' => 'g',
            'ı' | 'I' | 'İ' => 'i',
            'ö' | 'Ö' => 'o',
            'ş' | 'Ş' => 's',
            'ü' | 'Ü' => 'u',
            other => other.to_ascii_lowercase(),
        };

        if folded.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(folded);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Creates a product after validating its name, prices and category.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or produces an empty slug
/// - The price is not a positive finite number, or the compare price is negative
/// - The category does not exist
/// - The insert fails (e.g. duplicate slug or SKU)
pub async fn create_product<C>(db: &C, new_product: NewProduct) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let name = new_product.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::InvalidProduct("Product name cannot be empty".to_string()));
    }

    let slug = slugify(&name);
    if slug.is_empty() {
        return Err(Error::InvalidProduct(format!(
            "Product name '{name}' does not produce a usable slug"
        )));
    }

    if !new_product.price.is_finite() || new_product.price <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: new_product.price,
        });
    }

    if let Some(compare_price) = new_product
        .compare_price
        .filter(|p| !p.is_finite() || *p < 0.0)
    {
        return Err(Error::InvalidAmount {
            amount: compare_price,
        });
    }

    if Category::find_by_id(new_product.category_id.clone())
        .one(db)
        .await?
        .is_none()
    {
        return Err(Error::InvalidCategory {
            id: new_product.category_id,
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let model = product::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        slug: Set(slug),
        description: Set(new_product.description),
        short_description: Set(new_product.short_description),
        price: Set(new_product.price),
        compare_price: Set(new_product.compare_price),
        category_id: Set(new_product.category_id),
        stock_quantity: Set(new_product.stock_quantity),
        sku: Set(new_product.sku),
        is_active: Set(new_product.is_active),
        is_featured: Set(new_product.is_featured),
        images: Set(Some(serde_json::to_string(&new_product.images)?)),
        tags: Set(Some(serde_json::to_string(&new_product.tags)?)),
        ingredients: Set(new_product.ingredients),
        allergens: Set(new_product.allergens),
        shelf_life_days: Set(new_product.shelf_life_days),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    info!(
        "Created product '{}' ({}) in category {}",
        created.name, created.id, created.category_id
    );
    Ok(created)
}

/// Retrieves a product by id, active or not.
pub async fn get_product_by_id<C>(db: &C, product_id: &str) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by its slug, active or not.
pub async fn get_product_by_slug<C>(db: &C, slug: &str) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}
