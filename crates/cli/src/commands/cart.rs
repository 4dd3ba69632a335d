//! Inspect or clear the persisted cart snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use quitanda_server::db::FileKvStore;
use quitanda_server::services::{CartStore, cart_total};

/// Print the current cart snapshot as JSON.
#[allow(clippy::print_stdout)]
pub async fn show(data_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let cart = open(data_dir);
    let entries = cart.load().await?;

    println!("{}", serde_json::to_string_pretty(&entries)?);
    info!(
        entries = entries.len(),
        total = %cart_total(&entries),
        "cart snapshot"
    );
    Ok(())
}

/// Delete the cart snapshot. Idempotent.
pub async fn clear(data_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let cart = open(data_dir);
    cart.clear().await?;
    info!("cart cleared");
    Ok(())
}

fn open(data_dir: PathBuf) -> CartStore {
    CartStore::new(Arc::new(FileKvStore::new(data_dir)))
}
