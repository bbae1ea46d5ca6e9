//! Site settings - key-value pairs read by the storefront (site name, currency, tax rate).

use crate::{
    entities::{SiteSetting, site_setting},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::info;

/// A setting as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingEntry {
    /// Setting key
    pub key: String,
    /// Setting value
    pub value: Option<String>,
}

impl From<site_setting::Model> for SettingEntry {
    fn from(model: site_setting::Model) -> Self {
        Self {
            key: model.key,
            value: model.value,
        }
    }
}

/// Retrieves the value stored under `key`, `None` if the key is absent.
pub async fn get_site_setting<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let setting = SiteSetting::find_by_id(key).one(db).await?;
    Ok(setting.and_then(|s| s.value))
}

/// Retrieves every setting ordered by key.
pub async fn list_site_settings<C>(db: &C) -> Result<Vec<SettingEntry>>
where
    C: ConnectionTrait,
{
    let settings = SiteSetting::find()
        .order_by_asc(site_setting::Column::Key)
        .all(db)
        .await?;
    Ok(settings.into_iter().map(SettingEntry::from).collect())
}

/// Stores `value` under `key`, inserting the key if needed and refreshing `updated_at`.
pub async fn set_site_setting<C>(db: &C, key: &str, value: &str) -> Result<SettingEntry>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();

    let saved = if let Some(existing) = SiteSetting::find_by_id(key).one(db).await? {
        let mut active_model: site_setting::ActiveModel = existing.into();
        active_model.value = Set(Some(value.to_string()));
        active_model.updated_at = Set(now);
        active_model.update(db).await?
    } else {
        let new_setting = site_setting::ActiveModel {
            key: Set(key.to_string()),
            value: Set(Some(value.to_string())),
            updated_at: Set(now),
        };
        new_setting.insert(db).await?
    };

    info!("Site setting '{}' set to '{}'", key, value);
    Ok(saved.into())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_seeded_settings_are_readable() -> Result<()> {
        let db = setup_seeded_db().await?;

        assert_eq!(
            get_site_setting(&db, "currency_symbol").await?.as_deref(),
            Some("₺")
        );
        assert_eq!(get_site_setting(&db, "tax_rate").await?.as_deref(), Some("18.0"));
        assert!(get_site_setting(&db, "missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_site_settings_sorted() -> Result<()> {
        let db = setup_seeded_db().await?;

        let settings = list_site_settings(&db).await?;

        let keys: Vec<&str> = settings.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "currency",
                "currency_symbol",
                "free_shipping_threshold",
                "site_description",
                "site_name",
                "tax_rate",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_set_site_setting_updates_and_inserts() -> Result<()> {
        let db = setup_seeded_db().await?;

        let updated = set_site_setting(&db, "tax_rate", "20.0").await?;
        let inserted = set_site_setting(&db, "opening_hours", "08:00-20:00").await?;

        assert_eq!(updated.value.as_deref(), Some("20.0"));
        assert_eq!(inserted.key, "opening_hours");
        assert_eq!(get_site_setting(&db, "tax_rate").await?.as_deref(), Some("20.0"));
        assert_eq!(list_site_settings(&db).await?.len(), 7);
        Ok(())
    }
}
