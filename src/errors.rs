use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid category: {id}")]
    InvalidCategory { id: String },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Profit margin is undefined for a suggested price of {price}")]
    UndefinedMargin { price: f64 },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
