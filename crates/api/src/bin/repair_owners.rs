//! Maintenance binary: backfill the ownership ledger.
//!
//! Attaches a sole "Unknown Owner" share to every asset that has no
//! recorded owners. Safe to run repeatedly.

use anyhow::Result;
use tracing::info;

use asset_registry_api::{config::Config, middleware::logging::init_logging};
use persistence::repositories::backfill_missing_owners;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_logging(&config.logging);

    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

    let summary = backfill_missing_owners(&pool).await?;
    info!(
        assets_repaired = summary.assets_repaired,
        placeholder_created = summary.placeholder_created,
        "owner backfill finished"
    );
    println!(
        "Repaired {} asset(s){}",
        summary.assets_repaired,
        if summary.placeholder_created {
            " (created the Unknown Owner placeholder)"
        } else {
            ""
        }
    );

    Ok(())
}
