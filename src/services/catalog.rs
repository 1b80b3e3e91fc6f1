use sqlx::PgPool;

use crate::{
    models::food_item::{CreateFoodItemRequest, DietType, FoodItem},
    services::errors::{ServiceError, ServiceResult},
};

const NON_VEG_KEYWORDS: [&str; 6] = ["chicken", "fish", "egg", "omelette", "puff", "non-veg"];

/// Keyword classification of a dish name, used by the diet backfill tool and
/// as the default when an admin omits the diet type.
pub fn classify_diet(name: &str) -> DietType {
    let lower = name.to_lowercase();

    let mut diet = DietType::Veg;
    if NON_VEG_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        diet = DietType::NonVeg;
    }

    // Always veg, whatever the keywords say.
    if lower.contains("bonda") || lower.contains("bajji") {
        diet = DietType::Veg;
    }

    diet
}

pub struct CatalogService;

impl CatalogService {
    /// Insert a new food item. Name is the natural key; a duplicate is a
    /// validation error, not a fault.
    pub async fn create(pool: &PgPool, req: &CreateFoodItemRequest) -> ServiceResult<FoodItem> {
        let diet = req.diet_type.unwrap_or_else(|| classify_diet(&req.name));
        let item = sqlx::query_as::<_, FoodItem>(
            "INSERT INTO food_items (name, category, diet_type, image)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&req.name)
        .bind(req.category.to_string())
        .bind(diet.to_string())
        .bind(req.image.clone().unwrap_or_default())
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ServiceError::Validation(
                format!("A food item named \"{}\" already exists", req.name),
            ),
            _ => ServiceError::Database(e),
        })?;
        Ok(item)
    }

    pub async fn list(pool: &PgPool) -> ServiceResult<Vec<FoodItem>> {
        let items = sqlx::query_as::<_, FoodItem>(
            "SELECT * FROM food_items ORDER BY category, name",
        )
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> ServiceResult<FoodItem> {
        let item = sqlx::query_as::<_, FoodItem>("SELECT * FROM food_items WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?
            .ok_or(ServiceError::NotFound("Food item not found"))?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_non_veg_by_keyword() {
        assert_eq!(classify_diet("Chicken Biryani"), DietType::NonVeg);
        assert_eq!(classify_diet("Fish Curry with Rice"), DietType::NonVeg);
        assert_eq!(classify_diet("Egg Puff"), DietType::NonVeg);
        assert_eq!(classify_diet("Bread Omelette"), DietType::NonVeg);
    }

    #[test]
    fn defaults_to_veg() {
        assert_eq!(classify_diet("Idli with Sambar"), DietType::Veg);
        assert_eq!(classify_diet("Curd Rice"), DietType::Veg);
    }

    #[test]
    fn veg_overrides_win_over_keywords() {
        assert_eq!(classify_diet("Bonda"), DietType::Veg);
        assert_eq!(classify_diet("Bajji"), DietType::Veg);
    }
}
