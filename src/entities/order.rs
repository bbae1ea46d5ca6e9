//! Order entity - A customer order placed through the storefront.
//!
//! The table is owned by the storefront checkout flow; this crate only defines
//! its schema and a typed view of the serialized line items.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Name the order is placed under
    pub customer_name: String,
    /// Optional contact email
    pub customer_email: Option<String>,
    /// Optional contact phone
    pub customer_phone: Option<String>,
    /// Where the order is delivered
    pub delivery_address: Option<String>,
    /// JSON array of [`OrderItem`]
    pub items: String,
    /// Order total including tax
    pub total_amount: f64,
    /// One of the [`OrderStatus`] values, `"pending"` on creation
    #[sea_orm(default_value = "pending")]
    pub status: String,
    /// How the customer pays (e.g. `"cash"`, `"card"`)
    pub payment_method: Option<String>,
    /// Requested delivery day
    pub delivery_date: Option<Date>,
    /// Free-text notes from the customer
    pub special_instructions: Option<String>,
    /// When the order was placed
    #[sea_orm(default_expr = "sea_orm::sea_query::Expr::current_timestamp()")]
    pub created_at: DateTime,
    /// When the order was last modified
    #[sea_orm(default_expr = "sea_orm::sea_query::Expr::current_timestamp()")]
    pub updated_at: DateTime,
}

/// Orders have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A single line of an order as stored in the `items` column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product the line refers to
    pub product_id: String,
    /// Product name at the time of ordering
    pub name: String,
    /// Units ordered
    pub quantity: u32,
    /// Unit price at the time of ordering
    pub price: f64,
}

/// Lifecycle states of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet accepted by the kitchen
    Pending,
    /// Being prepared
    Preparing,
    /// Delivered or picked up
    Completed,
    /// Cancelled by customer or shop
    Cancelled,
}

impl OrderStatus {
    /// Column representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status column value. Legacy `"confirmed"` and `"ready"` map to `Preparing`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "preparing" | "confirmed" | "ready" => Some(Self::Preparing),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Model {
    /// Decodes the ordered line items.
    ///
    /// # Errors
    /// Returns an error if the `items` column is not a JSON array of line items.
    pub fn line_items(&self) -> serde_json::Result<Vec<OrderItem>> {
        serde_json::from_str(&self.items)
    }

    /// Typed status, `None` if the column holds an unknown value.
    #[must_use]
    pub fn order_status(&self) -> Option<OrderStatus> {
        OrderStatus::parse(&self.status)
    }
}
