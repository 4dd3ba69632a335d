//! Quitanda CLI - catalog seeding and cart inspection.
//!
//! # Usage
//!
//! ```bash
//! # Write a starter catalog file
//! quitanda-cli seed catalog --path data/catalog.json
//!
//! # Inspect the persisted cart snapshot
//! quitanda-cli cart show --data-dir data
//!
//! # Drop the persisted cart snapshot
//! quitanda-cli cart clear --data-dir data
//! ```
//!
//! # Commands
//!
//! - `seed catalog` - Write a starter product catalog
//! - `cart show` / `cart clear` - Inspect or drop the local cart snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quitanda-cli")]
#[command(author, version, about = "Quitanda CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed local data files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect or clear the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Write a starter product catalog JSON file
    Catalog {
        /// Destination path for the catalog file
        #[arg(short, long, default_value = "data/catalog.json")]
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the current cart snapshot
    Show {
        /// Key-value store directory
        #[arg(short, long, default_value = "data")]
        data_dir: String,
    },
    /// Delete the cart snapshot
    Clear {
        /// Key-value store directory
        #[arg(short, long, default_value = "data")]
        data_dir: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { target } => match target {
            SeedTarget::Catalog { path, force } => {
                commands::seed::catalog(path.as_ref(), force)?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show { data_dir } => commands::cart::show(data_dir.into()).await?,
            CartAction::Clear { data_dir } => commands::cart::clear(data_dir.into()).await?,
        },
    }
    Ok(())
}
