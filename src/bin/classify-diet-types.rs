//! Diet type backfill
//!
//! Re-runs the keyword classifier over every catalog item and writes the
//! result back. Useful after bulk imports that left diet_type at its default.
//!
//! Usage:
//!   DATABASE_URL=... ./classify-diet-types

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::env;

use messmenu_api::models::food_item::FoodItem;
use messmenu_api::services::catalog::classify_diet;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let items = sqlx::query_as::<_, FoodItem>("SELECT * FROM food_items ORDER BY name")
        .fetch_all(&pool)
        .await
        .context("Failed to fetch food items")?;

    for item in &items {
        let diet = classify_diet(&item.name);
        sqlx::query("UPDATE food_items SET diet_type = $1, updated_at = NOW() WHERE id = $2")
            .bind(diet.to_string())
            .bind(item.id)
            .execute(&pool)
            .await
            .with_context(|| format!("Failed to update {}", item.name))?;
        println!("Updated {} -> {diet}", item.name);
    }

    println!("Diet classifications updated for {} items", items.len());
    Ok(())
}
