use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::menu::{Menu, MENU_SIZE},
    services::errors::{ServiceError, ServiceResult},
};

/// A lock list must fill every one of the 28 slots. Checked before anything
/// touches the store.
pub fn validate_lock_list(items: &[Uuid]) -> ServiceResult<()> {
    if items.len() != MENU_SIZE {
        return Err(ServiceError::Validation(format!(
            "Menu must have exactly {MENU_SIZE} items, got {}",
            items.len()
        )));
    }
    Ok(())
}

pub struct MenuService;

impl MenuService {
    /// Commit an admin-approved item list as the locked menu for a period.
    /// Each lock inserts a new record; prior locks are kept.
    pub async fn lock(
        pool: &PgPool,
        month: &str,
        week: i32,
        items: &[Uuid],
    ) -> ServiceResult<Menu> {
        validate_lock_list(items)?;

        let menu = sqlx::query_as::<_, Menu>(
            "INSERT INTO menus (month, week, items, is_locked)
             VALUES ($1, $2, $3, TRUE)
             RETURNING *",
        )
        .bind(month)
        .bind(week)
        .bind(items.to_vec())
        .fetch_one(pool)
        .await?;
        Ok(menu)
    }

    /// The authoritative menu for a period: the most recent locked record.
    pub async fn find(pool: &PgPool, month: &str, week: i32) -> ServiceResult<Menu> {
        let menu = sqlx::query_as::<_, Menu>(
            "SELECT * FROM menus
             WHERE month = $1 AND week = $2 AND is_locked = TRUE
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(month)
        .bind(week)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::NotFound("Menu not found for this period"))?;
        Ok(menu)
    }

    /// Latest locked menu regardless of period, for maintenance tooling.
    pub async fn find_latest(pool: &PgPool) -> ServiceResult<Menu> {
        let menu = sqlx::query_as::<_, Menu>(
            "SELECT * FROM menus WHERE is_locked = TRUE ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::NotFound("No locked menu yet"))?;
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_list_of_28_is_accepted() {
        let items: Vec<Uuid> = (0..28).map(Uuid::from_u128).collect();
        assert!(validate_lock_list(&items).is_ok());
    }

    #[test]
    fn lock_list_of_wrong_size_is_rejected() {
        let short: Vec<Uuid> = (0..27).map(Uuid::from_u128).collect();
        let long: Vec<Uuid> = (0..29).map(Uuid::from_u128).collect();
        assert!(matches!(
            validate_lock_list(&short).unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            validate_lock_list(&long).unwrap_err(),
            ServiceError::Validation(_)
        ));
    }
}
