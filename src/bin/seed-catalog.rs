//! Catalog seed script
//!
//! Upserts the canonical mess catalog by item name, so it is safe to run
//! repeatedly. Diet types are filled in by the keyword classifier; the
//! classify-diet-types tool can re-run the classification later.
//!
//! Usage:
//!   DATABASE_URL=... ./seed-catalog

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::env;

use messmenu_api::services::catalog::classify_diet;

const CATALOG: [(&str, &str); 40] = [
    // Morning breakfast
    ("Idli with Sambar", "Breakfast"),
    ("Plain Dosa", "Breakfast"),
    ("Masala Dosa", "Breakfast"),
    ("Pongal", "Breakfast"),
    ("Poori with Potato Masala", "Breakfast"),
    ("Upma", "Breakfast"),
    ("Rava Dosa", "Breakfast"),
    ("Appam with Coconut Milk", "Breakfast"),
    ("Puttu with Kadala Curry", "Breakfast"),
    ("Egg Omelette", "Breakfast"),
    // Afternoon lunch
    ("Veg Meals (Rice, Sambar, Poriyal, Appalam)", "Lunch"),
    ("Sambar Rice", "Lunch"),
    ("Rasam Rice", "Lunch"),
    ("Curd Rice", "Lunch"),
    ("Lemon Rice", "Lunch"),
    ("Vegetable Biryani", "Lunch"),
    ("Kootu with Rice", "Lunch"),
    ("Chicken Curry with Rice", "Lunch"),
    ("Chicken Biryani", "Lunch"),
    ("Chicken Fry", "Lunch"),
    ("Fish Curry with Rice", "Lunch"),
    ("Fish Fry", "Lunch"),
    // Evening snacks
    ("Bajji", "Snack"),
    ("Bonda", "Snack"),
    ("Samosa", "Snack"),
    ("Sundal (Channa / Peanut)", "Snack"),
    ("Vada", "Snack"),
    ("Mixture", "Snack"),
    ("Bread Omelette", "Snack"),
    ("Egg Puff", "Snack"),
    // Night dinner
    ("Chapati with Veg Kurma", "Dinner"),
    ("Parotta with Veg Salna", "Dinner"),
    ("Idiyappam with Kurma", "Dinner"),
    ("Lemon Sevai", "Dinner"),
    ("Vegetable Fried Rice", "Dinner"),
    ("Dosa with Chutney", "Dinner"),
    ("Parotta with Chicken Salna", "Dinner"),
    ("Chapati with Chicken Gravy", "Dinner"),
    ("Chicken Fried Rice", "Dinner"),
    ("Fish Gravy with Rice", "Dinner"),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    println!("=== Seed Catalog ===");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    for (name, category) in CATALOG {
        let diet = classify_diet(name);
        sqlx::query(
            "INSERT INTO food_items (name, category, diet_type)
             VALUES ($1, $2, $3)
             ON CONFLICT (name) DO UPDATE SET
                 category = EXCLUDED.category,
                 updated_at = NOW()",
        )
        .bind(name)
        .bind(category)
        .bind(diet.to_string())
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to upsert {name}"))?;
    }

    println!("Seeded {} food items", CATALOG.len());
    Ok(())
}
