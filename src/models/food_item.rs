use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The four meal slots of a dining day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealCategory {
    /// Grid order: this is also the slot order within a day of a locked menu.
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Snack,
        MealCategory::Dinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "Breakfast",
            MealCategory::Lunch => "Lunch",
            MealCategory::Snack => "Snack",
            MealCategory::Dinner => "Dinner",
        }
    }
}

impl std::fmt::Display for MealCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MealCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(MealCategory::Breakfast),
            "Lunch" => Ok(MealCategory::Lunch),
            "Snack" => Ok(MealCategory::Snack),
            "Dinner" => Ok(MealCategory::Dinner),
            _ => Err(anyhow::anyhow!("Unknown meal category: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DietType {
    Veg,
    #[serde(rename = "Non-Veg")]
    NonVeg,
}

impl std::fmt::Display for DietType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DietType::Veg => "Veg",
            DietType::NonVeg => "Non-Veg",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for DietType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Veg" => Ok(DietType::Veg),
            "Non-Veg" => Ok(DietType::NonVeg),
            _ => Err(anyhow::anyhow!("Unknown diet type: {s}")),
        }
    }
}

/// DB row struct — category and diet_type are kept as TEXT and parsed where needed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub diet_type: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for POST /admin/food-item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodItemRequest {
    pub name: String,
    pub category: MealCategory,
    #[serde(default)]
    pub diet_type: Option<DietType>,
    #[serde(default)]
    pub image: Option<String>,
}
