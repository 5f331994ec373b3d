//! SwiftCart CLI - Session store setup and catalog browsing.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table
//! swiftcart migrate
//!
//! # List categories
//! swiftcart catalog categories
//!
//! # List products, optionally for one category
//! swiftcart catalog products --category electronics
//!
//! # Show one product
//! swiftcart catalog show 3
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the session table in the storefront database
//! - `catalog` - Query the catalog API the storefront is configured with
//!
//! Configuration comes from the same environment variables as the storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use swiftcart_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "swiftcart")]
#[command(author, version, about = "SwiftCart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the session table in the storefront database
    Migrate,
    /// Query the catalog API
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List category tags
    Categories,
    /// List products
    Products {
        /// Only list products in this category (`all` lists everything)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a single product
    Show {
        /// Product ID
        id: ProductId,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swiftcart_cli=info,swiftcart_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Catalog { action } => match action {
            CatalogAction::Categories => commands::catalog::categories().await?,
            CatalogAction::Products { category } => {
                commands::catalog::products(category.as_deref()).await?;
            }
            CatalogAction::Show { id } => commands::catalog::show(id).await?,
        },
    }
    Ok(())
}
