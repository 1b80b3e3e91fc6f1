use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::food_item::{FoodItem, MealCategory};

/// A locked menu holds one item per meal slot: 7 days x 4 meals.
pub const MENU_SIZE: usize = 28;
/// Items per category in a complete monthly selection or generated proposal.
pub const ITEMS_PER_CATEGORY: usize = 7;
/// Feedback and replacement ballots carry at most this many items.
pub const BALLOT_ITEM_CAP: usize = 3;

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// DB row struct for an admin-locked menu.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: Uuid,
    /// Period, "YYYY-MM".
    pub month: String,
    pub week: i32,
    /// Flat list of 28 item ids, day-major: [bk0, ln0, sn0, dn0, bk1, ...].
    pub items: Vec<Uuid>,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Menu {
    /// Locate an item in the flat 28-slot list as (day index, meal slot).
    pub fn slot_of(&self, item_id: Uuid) -> Option<(usize, MealCategory)> {
        let index = self.items.iter().position(|&id| id == item_id)?;
        Some((index / MealCategory::ALL.len(), MealCategory::ALL[index % MealCategory::ALL.len()]))
    }
}

fn default_week() -> i32 {
    1
}

/// Body for POST /admin/menu.
#[derive(Debug, Deserialize)]
pub struct LockMenuRequest {
    pub month: String,
    #[serde(default = "default_week")]
    pub week: i32,
    pub items: Vec<Uuid>,
}

/// Query params for GET /student/menu and GET /admin/generate-weekly.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub month: String,
    #[serde(default = "default_week")]
    pub week: i32,
}

/// A catalog item paired with its tallied vote count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: FoodItem,
    pub vote_count: i64,
}

/// One day of a proposed weekly grid; a short category leaves a null slot.
#[derive(Debug, Clone, Serialize)]
pub struct DayMenu {
    pub day: &'static str,
    pub breakfast: Option<RankedItem>,
    pub lunch: Option<RankedItem>,
    pub snack: Option<RankedItem>,
    pub dinner: Option<RankedItem>,
}

/// Response for GET /admin/generate-monthly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProposal {
    pub suggested_items: Vec<RankedItem>,
    pub week_menu: Vec<DayMenu>,
    pub counts: HashMap<Uuid, i64>,
}

/// Response for GET /admin/generate-weekly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProposal {
    pub disliked: Vec<Uuid>,
    pub replacements: Vec<Uuid>,
    pub dislike_counts: HashMap<Uuid, i64>,
    pub replacement_counts: HashMap<Uuid, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_with(items: Vec<Uuid>) -> Menu {
        Menu {
            id: Uuid::from_u128(999),
            month: "2025-06".into(),
            week: 1,
            items,
            is_locked: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn slot_of_maps_flat_index_to_day_and_meal() {
        let items: Vec<Uuid> = (0..28).map(Uuid::from_u128).collect();
        let menu = menu_with(items);

        assert_eq!(menu.slot_of(Uuid::from_u128(0)), Some((0, MealCategory::Breakfast)));
        // Index 9 = day 2, second slot of the day.
        assert_eq!(menu.slot_of(Uuid::from_u128(9)), Some((2, MealCategory::Lunch)));
        assert_eq!(menu.slot_of(Uuid::from_u128(27)), Some((6, MealCategory::Dinner)));
    }

    #[test]
    fn slot_of_returns_none_for_absent_item() {
        let menu = menu_with((0..28).map(Uuid::from_u128).collect());
        assert_eq!(menu.slot_of(Uuid::from_u128(1000)), None);
    }
}
