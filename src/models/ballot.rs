use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The three voting rounds a student can participate in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BallotType {
    /// Initial vote for the 28 items of a monthly menu.
    MonthlySelection,
    /// Up to 3 disliked items from the current menu.
    Feedback,
    /// Up to 3 suggested replacement items.
    Replacement,
}

impl std::fmt::Display for BallotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BallotType::MonthlySelection => "monthly_selection",
            BallotType::Feedback => "feedback",
            BallotType::Replacement => "replacement",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BallotType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly_selection" => Ok(BallotType::MonthlySelection),
            "feedback" => Ok(BallotType::Feedback),
            "replacement" => Ok(BallotType::Replacement),
            _ => Err(anyhow::anyhow!("Unknown ballot type: {s}")),
        }
    }
}

/// DB row struct — ballot_type is kept as TEXT and parsed where needed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ballot {
    pub id: Uuid,
    pub student_id: Uuid,
    /// Voting period, "YYYY-MM".
    pub month: String,
    pub week: i32,
    pub ballot_type: String,
    pub items: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_week() -> i32 {
    1
}

/// Body for POST /student/vote-monthly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyVoteRequest {
    pub month: String,
    pub selected_items: Vec<Uuid>,
}

/// Body for POST /student/feedback.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub month: String,
    #[serde(default = "default_week")]
    pub week: i32,
    pub disliked_items: Vec<Uuid>,
}

/// Body for POST /student/vote-replacement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementVoteRequest {
    pub month: String,
    #[serde(default = "default_week")]
    pub week: i32,
    pub replacement_items: Vec<Uuid>,
}

/// Query params for GET /admin/votes and GET /admin/generate-monthly.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: String,
}
