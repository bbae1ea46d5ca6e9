//! Catalog query service - read-only listings of categories and products.
//!
//! Results are shaped for the storefront API: price bands are flattened into a
//! two-element array and product image references are decoded from JSON.

use crate::{
    entities::{Category, Product, category, product},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, prelude::*};
use serde::Serialize;

/// Default row cap for [`get_products`].
pub const DEFAULT_PRODUCT_LIMIT: u64 = 50;

/// A category as listed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    /// Category id
    pub id: String,
    /// Display name
    pub name: String,
    /// Category description
    pub description: Option<String>,
    /// `[min, max]` price band
    pub price_range: [f64; 2],
    /// Always true for listed categories
    pub is_active: bool,
}

impl From<category::Model> for CategorySummary {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price_range: [model.price_range_min, model.price_range_max],
            is_active: model.is_active,
        }
    }
}

/// A product as listed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    /// Product id
    pub id: String,
    /// Product name
    pub name: String,
    /// URL handle
    pub slug: String,
    /// Long description
    pub description: Option<String>,
    /// Sale price
    pub price: f64,
    /// Owning category
    pub category_id: String,
    /// Units on hand
    pub stock_quantity: i32,
    /// Always true for listed products
    pub is_active: bool,
    /// Highlighted on the home page
    pub is_featured: bool,
    /// Decoded image references, empty when none are stored
    pub images: Vec<String>,
}

impl TryFrom<product::Model> for ProductSummary {
    type Error = crate::errors::Error;

    fn try_from(model: product::Model) -> Result<Self> {
        let images = model.image_list()?;
        Ok(Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            price: model.price,
            category_id: model.category_id,
            stock_quantity: model.stock_quantity,
            is_active: model.is_active,
            is_featured: model.is_featured,
            images,
        })
    }
}

/// Retrieves all active categories, ordered by name.
pub async fn get_categories<C>(db: &C) -> Result<Vec<CategorySummary>>
where
    C: ConnectionTrait,
{
    let categories = Category::find()
        .filter(category::Column::IsActive.eq(true))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;

    Ok(categories.into_iter().map(CategorySummary::from).collect())
}

/// Retrieves up to `limit` active products ordered by name, optionally within one category.
///
/// An empty category id is treated as no filter.
///
/// # Errors
/// Returns an error if the query fails or a product's stored images are not a JSON array.
pub async fn get_products<C>(
    db: &C,
    category_id: Option<&str>,
    limit: u64,
) -> Result<Vec<ProductSummary>>
where
    C: ConnectionTrait,
{
    let mut query = Product::find().filter(product::Column::IsActive.eq(true));
    if let Some(category_id) = category_id.filter(|id| !id.is_empty()) {
        query = query.filter(product::Column::CategoryId.eq(category_id));
    }

    query
        .order_by_asc(product::Column::Name)
        .limit(limit)
        .all(db)
        .await?
        .into_iter()
        .map(ProductSummary::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::Set;

    #[tokio::test]
    async fn test_get_categories_ordered_by_name() -> Result<()> {
        let db = setup_seeded_db().await?;

        let categories = get_categories(&db).await?;

        assert_eq!(categories.len(), 8);
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        let pastalar = categories.iter().find(|c| c.id == "pastalar").unwrap();
        assert_eq!(pastalar.price_range, [100.0, 500.0]);
        assert!(pastalar.is_active);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_categories_skips_inactive() -> Result<()> {
        let db = setup_seeded_db().await?;
        let mut tatlilar: category::ActiveModel = Category::find_by_id("tatlilar")
            .one(&db)
            .await?
            .unwrap()
            .into();
        tatlilar.is_active = Set(false);
        tatlilar.update(&db).await?;

        let categories = get_categories(&db).await?;

        assert_eq!(categories.len(), 7);
        assert!(categories.iter().all(|c| c.id != "tatlilar"));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_products_filters_limits_and_orders() -> Result<()> {
        let db = setup_seeded_db().await?;
        create_test_product(&db, "Simit", "ekmekler").await?;
        create_test_product(&db, "Ekmek", "ekmekler").await?;
        create_test_product(&db, "Poğaça", "ekmekler").await?;
        create_test_product(&db, "Brownie", "kekler-muffinler").await?;
        let hidden = create_test_product(&db, "Açma", "ekmekler").await?;
        deactivate_product(&db, &hidden.id).await?;

        let products = get_products(&db, Some("ekmekler"), 2).await?;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Ekmek");
        assert_eq!(products[1].name, "Poğaça");
        assert!(
            products
                .iter()
                .all(|p| p.category_id == "ekmekler" && p.is_active)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_get_products_without_category() -> Result<()> {
        let db = setup_seeded_db().await?;
        create_test_product(&db, "Simit", "ekmekler").await?;
        create_test_product(&db, "Brownie", "kekler-muffinler").await?;

        let products = get_products(&db, None, DEFAULT_PRODUCT_LIMIT).await?;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Brownie");
        assert_eq!(products[1].name, "Simit");
        assert!(products.iter().all(|p| p.images.is_empty()));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_products_empty_category_means_all() -> Result<()> {
        let db = setup_seeded_db().await?;
        create_test_product(&db, "Simit", "ekmekler").await?;
        create_test_product(&db, "Brownie", "kekler-muffinler").await?;

        let products = get_products(&db, Some(""), DEFAULT_PRODUCT_LIMIT).await?;

        assert_eq!(products.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_products_decodes_images() -> Result<()> {
        let db = setup_seeded_db().await?;
        let mut new_product = crate::core::product::NewProduct::new("Tiramisu", "pastalar", 180.0);
        new_product.images = vec!["/uploads/pastalar/tiramisu.jpg".to_string()];
        crate::core::product::create_product(&db, new_product).await?;

        let products = get_products(&db, Some("pastalar"), 10).await?;

        assert_eq!(products[0].images, vec!["/uploads/pastalar/tiramisu.jpg"]);
        assert_eq!(products[0].price, 180.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_products_malformed_images_fail() -> Result<()> {
        let db = setup_seeded_db().await?;
        let product = create_test_product(&db, "Simit", "ekmekler").await?;
        let mut broken: product::ActiveModel = product.into();
        broken.images = Set(Some("{not json".to_string()));
        broken.update(&db).await?;

        let result = get_products(&db, None, 10).await;

        assert!(matches!(result, Err(crate::errors::Error::Json(_))));
        Ok(())
    }
}
