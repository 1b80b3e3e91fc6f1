//! Menu slot lookup
//!
//! Reports whether a catalog item appears in the latest locked menu and, if
//! so, on which day and meal slot.
//!
//! Usage:
//!   DATABASE_URL=... ./check-menu-slot "Masala Dosa"

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::env;

use messmenu_api::models::menu::DAYS;
use messmenu_api::services::{catalog::CatalogService, menu::MenuService};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let name = env::args()
        .nth(1)
        .context("usage: check-menu-slot <item name>")?;
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let item = CatalogService::find_by_name(&pool, &name)
        .await
        .map_err(|_| anyhow::anyhow!("{name} not found in the catalog"))?;
    println!(
        "{name}: category={}, diet={}, id={}",
        item.category, item.diet_type, item.id
    );

    let menu = MenuService::find_latest(&pool)
        .await
        .map_err(|_| anyhow::anyhow!("No locked menu to check against"))?;
    println!("Latest locked menu: {} week {}", menu.month, menu.week);

    match menu.slot_of(item.id) {
        Some((day, meal)) => println!("Found in menu on {} at {meal}", DAYS[day]),
        None => println!("Not in the latest locked menu"),
    }

    Ok(())
}
