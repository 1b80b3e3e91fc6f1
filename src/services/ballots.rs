use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::{
        ballot::{Ballot, BallotType},
        food_item::{FoodItem, MealCategory},
        menu::{BALLOT_ITEM_CAP, ITEMS_PER_CATEGORY, MENU_SIZE},
    },
    services::{
        catalog::CatalogService,
        errors::{ServiceError, ServiceResult},
    },
};

/// A monthly selection must hold exactly 28 items, 7 per category.
/// Category membership is resolved against the catalog; an unknown id is
/// rejected rather than silently dropped.
pub fn validate_monthly_selection(catalog: &[FoodItem], ids: &[Uuid]) -> ServiceResult<()> {
    if ids.len() != MENU_SIZE {
        return Err(ServiceError::Validation(format!(
            "You must select exactly {MENU_SIZE} items"
        )));
    }

    let by_id: HashMap<Uuid, &FoodItem> = catalog.iter().map(|i| (i.id, i)).collect();
    let mut counts = [0usize; 4];
    for id in ids {
        let item = by_id
            .get(id)
            .ok_or_else(|| ServiceError::Validation(format!("Unknown food item: {id}")))?;
        if let Ok(category) = item.category.parse::<MealCategory>() {
            counts[category as usize] += 1;
        }
    }

    for category in MealCategory::ALL {
        let count = counts[category as usize];
        if count != ITEMS_PER_CATEGORY {
            return Err(ServiceError::Validation(format!(
                "Expected {ITEMS_PER_CATEGORY} {category} items, got {count}"
            )));
        }
    }
    Ok(())
}

/// Feedback and replacement ballots carry at most 3 items; an empty list is
/// allowed and clears the ballot.
pub fn validate_capped_ballot(ids: &[Uuid], label: &str) -> ServiceResult<()> {
    if ids.len() > BALLOT_ITEM_CAP {
        return Err(ServiceError::Validation(format!(
            "You can select at most {BALLOT_ITEM_CAP} {label} items"
        )));
    }
    Ok(())
}

pub struct BallotService;

impl BallotService {
    /// Validate and record a monthly selection. Monthly ballots always live
    /// in week 1 of their month.
    pub async fn submit_monthly(
        pool: &PgPool,
        student_id: Uuid,
        month: &str,
        items: &[Uuid],
    ) -> ServiceResult<Ballot> {
        let catalog = CatalogService::list(pool).await?;
        validate_monthly_selection(&catalog, items)?;
        Self::upsert(pool, student_id, month, 1, BallotType::MonthlySelection, items).await
    }

    pub async fn submit_feedback(
        pool: &PgPool,
        student_id: Uuid,
        month: &str,
        week: i32,
        items: &[Uuid],
    ) -> ServiceResult<Ballot> {
        validate_capped_ballot(items, "disliked")?;
        Self::upsert(pool, student_id, month, week, BallotType::Feedback, items).await
    }

    pub async fn submit_replacement(
        pool: &PgPool,
        student_id: Uuid,
        month: &str,
        week: i32,
        items: &[Uuid],
    ) -> ServiceResult<Ballot> {
        validate_capped_ballot(items, "replacement")?;
        Self::upsert(pool, student_id, month, week, BallotType::Replacement, items).await
    }

    /// Replace-on-resubmit: one ballot per (student, month, week, type), the
    /// unique constraint makes a resubmission overwrite the item list.
    async fn upsert(
        pool: &PgPool,
        student_id: Uuid,
        month: &str,
        week: i32,
        ballot_type: BallotType,
        items: &[Uuid],
    ) -> ServiceResult<Ballot> {
        let ballot = sqlx::query_as::<_, Ballot>(
            "INSERT INTO ballots (student_id, month, week, ballot_type, items)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (student_id, month, week, ballot_type) DO UPDATE SET
                 items = EXCLUDED.items,
                 updated_at = NOW()
             RETURNING *",
        )
        .bind(student_id)
        .bind(month)
        .bind(week)
        .bind(ballot_type.to_string())
        .bind(items.to_vec())
        .fetch_one(pool)
        .await?;
        Ok(ballot)
    }

    /// All ballots for a month, any type — the admin's raw view.
    pub async fn list_for_month(pool: &PgPool, month: &str) -> ServiceResult<Vec<Ballot>> {
        let ballots = sqlx::query_as::<_, Ballot>(
            "SELECT * FROM ballots WHERE month = $1 ORDER BY created_at",
        )
        .bind(month)
        .fetch_all(pool)
        .await?;
        Ok(ballots)
    }

    pub async fn list_monthly_selections(
        pool: &PgPool,
        month: &str,
    ) -> ServiceResult<Vec<Ballot>> {
        let ballots = sqlx::query_as::<_, Ballot>(
            "SELECT * FROM ballots
             WHERE month = $1 AND ballot_type = $2
             ORDER BY created_at",
        )
        .bind(month)
        .bind(BallotType::MonthlySelection.to_string())
        .fetch_all(pool)
        .await?;
        Ok(ballots)
    }

    pub async fn list_for_period(
        pool: &PgPool,
        month: &str,
        week: i32,
        ballot_type: BallotType,
    ) -> ServiceResult<Vec<Ballot>> {
        let ballots = sqlx::query_as::<_, Ballot>(
            "SELECT * FROM ballots
             WHERE month = $1 AND week = $2 AND ballot_type = $3
             ORDER BY created_at",
        )
        .bind(month)
        .bind(week)
        .bind(ballot_type.to_string())
        .fetch_all(pool)
        .await?;
        Ok(ballots)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn item(n: u128, category: MealCategory) -> FoodItem {
        FoodItem {
            id: Uuid::from_u128(n),
            name: format!("item-{n}"),
            category: category.as_str().to_string(),
            diet_type: "Veg".to_string(),
            image: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// 7 items in each of the four categories, ids 0..27.
    fn full_catalog() -> Vec<FoodItem> {
        let mut catalog = Vec::new();
        let mut n = 0u128;
        for &category in &MealCategory::ALL {
            for _ in 0..7 {
                catalog.push(item(n, category));
                n += 1;
            }
        }
        catalog
    }

    #[test]
    fn accepts_exactly_28_with_7_per_category() {
        let catalog = full_catalog();
        let ids: Vec<Uuid> = catalog.iter().map(|i| i.id).collect();
        assert!(validate_monthly_selection(&catalog, &ids).is_ok());
    }

    #[test]
    fn rejects_27_and_29_items() {
        let catalog = full_catalog();
        let ids: Vec<Uuid> = catalog.iter().map(|i| i.id).collect();

        let short = &ids[..27];
        assert!(validate_monthly_selection(&catalog, short).is_err());

        let mut long = ids.clone();
        long.push(Uuid::from_u128(100));
        assert!(validate_monthly_selection(&catalog, &long).is_err());
    }

    #[test]
    fn rejects_28_with_skewed_category_split() {
        // 8 breakfast / 6 lunch, still 28 total.
        let mut catalog = full_catalog();
        catalog.push(item(100, MealCategory::Breakfast));
        let mut ids: Vec<Uuid> = catalog.iter().map(|i| i.id).collect();
        ids.remove(7); // drop one lunch item

        let err = validate_monthly_selection(&catalog, &ids).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn rejects_ids_absent_from_catalog() {
        let catalog = full_catalog();
        let mut ids: Vec<Uuid> = catalog.iter().map(|i| i.id).collect();
        ids[0] = Uuid::from_u128(9999);

        let err = validate_monthly_selection(&catalog, &ids).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn capped_ballot_allows_up_to_three_and_empty() {
        let ids: Vec<Uuid> = (0..3).map(Uuid::from_u128).collect();
        assert!(validate_capped_ballot(&ids, "disliked").is_ok());
        assert!(validate_capped_ballot(&[], "disliked").is_ok());
    }

    #[test]
    fn capped_ballot_rejects_four() {
        let ids: Vec<Uuid> = (0..4).map(Uuid::from_u128).collect();
        let err = validate_capped_ballot(&ids, "disliked").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
