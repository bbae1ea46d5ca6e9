//! Butik Fırın CLI - runs one storefront operation and prints its JSON envelope.
//!
//! # Usage
//!
//! ```bash
//! butik-firin categories
//! butik-firin products ekmekler --limit 10
//! butik-firin suggest-price pastalar 100
//! butik-firin describe "Çikolatalı Kek" kekler-muffinler çikolata un
//! butik-firin backup
//! ```
//!
//! The envelope is printed even when the operation fails; callers must inspect
//! its `success` field; the exit status only reflects startup failures.

use butik_firin::{
    config::{StorePaths, load_default_catalog},
    core::catalog::DEFAULT_PRODUCT_LIMIT,
    errors::Result,
    service::Storefront,
};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "butik-firin")]
#[command(author, version, about = "Butik Fırın storefront operations")]
struct Cli {
    /// Project root holding dev.db, public/uploads and backups (defaults to BUTIK_FIRIN_ROOT or .)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create directories and the database if missing
    Init,
    /// List active categories
    Categories,
    /// List active products
    Products {
        /// Only list products of this category
        category_id: Option<String>,
        /// Maximum number of products
        #[arg(short, long, default_value_t = DEFAULT_PRODUCT_LIMIT)]
        limit: u64,
    },
    /// Suggest a sale price from a base cost
    SuggestPrice {
        /// Category id
        category_id: String,
        /// Production cost of one unit
        #[arg(allow_negative_numbers = true)]
        base_cost: f64,
    },
    /// Generate a product description
    Describe {
        /// Product name
        product_name: String,
        /// Category id
        category_id: String,
        /// Ingredient names
        ingredients: Vec<String>,
    },
    /// Snapshot the database into the backups directory
    Backup,
    /// List site settings
    Settings,
    /// Set a site setting
    SetSetting {
        /// Setting key
        key: String,
        /// Setting value
        value: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing on stderr so stdout carries only the envelope
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load the catalog configuration
    let catalog = load_default_catalog()
        .inspect_err(|e| error!("Failed to load catalog configuration: {}", e))?;

    let paths = cli
        .root
        .map_or_else(StorePaths::from_env, StorePaths::from_root);
    let storefront = Storefront::new(paths, catalog);

    // 4. Make sure directories and the store exist; `init` reports the outcome instead
    if !matches!(cli.command, Command::Init) {
        storefront
            .ensure_initialized()
            .await
            .inspect(|_| info!("Storefront initialized."))
            .inspect_err(|e| error!("Failed to initialize storefront: {}", e))?;
    }

    // 5. Run the requested operation
    let output = match cli.command {
        Command::Init => render(&storefront.initialize().await)?,
        Command::Categories => render(&storefront.get_categories().await)?,
        Command::Products { category_id, limit } => {
            render(&storefront.get_products(category_id.as_deref(), limit).await)?
        }
        Command::SuggestPrice {
            category_id,
            base_cost,
        } => render(&storefront.suggest_pricing(&category_id, base_cost))?,
        Command::Describe {
            product_name,
            category_id,
            ingredients,
        } => render(&storefront.generate_description(&product_name, &category_id, &ingredients))?,
        Command::Backup => render(&storefront.backup_database().await)?,
        Command::Settings => render(&storefront.get_site_settings().await)?,
        Command::SetSetting { key, value } => {
            render(&storefront.update_site_setting(&key, &value).await)?
        }
    };

    println!("{output}");
    Ok(())
}

fn render<T: Serialize>(response: &T) -> Result<String> {
    serde_json::to_string_pretty(response).map_err(Into::into)
}
