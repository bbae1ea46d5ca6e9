//! Core business logic - framework-agnostic storefront operations.
//!
//! Every function here returns an explicit [`crate::errors::Result`]; turning
//! failures into response envelopes is left to [`crate::service`].

/// Database snapshots into the backups directory
pub mod backup;
/// Read-only category and product listings
pub mod catalog;
/// Template-based product descriptions
pub mod description;
/// Category-aware price suggestions
pub mod pricing;
/// Product creation and lookup
pub mod product;
/// Upload and backup directory tree
pub mod provisioning;
/// Site settings key-value store
pub mod settings;
/// Store creation and seeding
pub mod storage;

/// Rounds to `places` decimal places, exact ties going to the even digit.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round_ties_even() / factor
}
