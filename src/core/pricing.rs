//! Pricing advisor - suggests a sale price from a base cost and a category band.
//!
//! The suggestion is a flat 40% markup clamped into the category's configured
//! price band. The reported minimum price is a 25% markup on cost and is not
//! clamped, so after clamping down to the band maximum it can exceed the
//! suggested price. Callers receive both values as computed.

use crate::{
    config::CatalogConfig,
    core::round_to,
    errors::{Error, Result},
};
use serde::Serialize;

/// Multiplier applied to cost for the suggested price.
pub const MARKUP_FACTOR: f64 = 1.40;
/// Multiplier applied to cost for the minimum acceptable price.
pub const MIN_PRICE_FACTOR: f64 = 1.25;
/// Markup reported alongside every suggestion.
pub const MARKUP_PERCENTAGE: u32 = 40;

/// A price suggestion for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSuggestion {
    /// Cost the suggestion is based on
    pub base_cost: f64,
    /// Suggested sale price, clamped into the category band, 2dp
    pub suggested_price: f64,
    /// Minimum price at a 25% markup, 2dp
    pub min_price: f64,
    /// The category band `[min, max]`
    pub category_range: [f64; 2],
    /// Always [`MARKUP_PERCENTAGE`]
    pub markup_percentage: u32,
    /// `(suggested - cost) / suggested * 100`, 1dp
    pub profit_margin: f64,
}

/// Suggests a price for a product of `category_id` costing `base_cost`.
///
/// Only the catalog configuration is consulted; the store is never touched.
///
/// # Errors
/// Returns an error if:
/// - The category is not configured ([`Error::InvalidCategory`])
/// - `base_cost` is negative or not finite ([`Error::InvalidAmount`])
/// - The clamped suggestion is zero, leaving the margin undefined ([`Error::UndefinedMargin`])
pub fn suggest_pricing(
    catalog: &CatalogConfig,
    category_id: &str,
    base_cost: f64,
) -> Result<PriceSuggestion> {
    let category = catalog.require_category(category_id)?;

    if !base_cost.is_finite() || base_cost < 0.0 {
        return Err(Error::InvalidAmount { amount: base_cost });
    }

    let min_price = base_cost * MIN_PRICE_FACTOR;
    let suggested = (base_cost * MARKUP_FACTOR).clamp(category.min_price(), category.max_price());

    if suggested <= 0.0 {
        return Err(Error::UndefinedMargin { price: suggested });
    }

    Ok(PriceSuggestion {
        base_cost,
        suggested_price: round_to(suggested, 2),
        min_price: round_to(min_price, 2),
        category_range: category.price_range,
        markup_percentage: MARKUP_PERCENTAGE,
        profit_margin: round_to((suggested - base_cost) / suggested * 100.0, 1),
    })
}
