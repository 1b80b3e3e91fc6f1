use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::{
        ballot::{Ballot, BallotType},
        food_item::{FoodItem, MealCategory},
        menu::{DayMenu, MonthlyProposal, RankedItem, WeeklyProposal, DAYS, ITEMS_PER_CATEGORY},
    },
    services::{
        ballots::BallotService,
        catalog::CatalogService,
        errors::ServiceResult,
    },
};

/// Sum votes per item across ballots. Each ballot contributes at most one
/// vote per item it lists — duplicate ids within a ballot are ignored.
pub fn tally(ballots: &[Ballot]) -> HashMap<Uuid, i64> {
    let mut counts = HashMap::new();
    for ballot in ballots {
        let mut seen = HashSet::new();
        for &id in &ballot.items {
            if seen.insert(id) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Rank one category of the catalog by vote count, descending, ties broken by
/// ascending item id, and keep the top `top_n`.
pub fn rank_category(
    catalog: &[FoodItem],
    counts: &HashMap<Uuid, i64>,
    category: MealCategory,
    top_n: usize,
) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = catalog
        .iter()
        .filter(|i| i.category == category.as_str())
        .map(|i| RankedItem {
            item: i.clone(),
            vote_count: counts.get(&i.id).copied().unwrap_or(0),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.vote_count
            .cmp(&a.vote_count)
            .then(a.item.id.cmp(&b.item.id))
    });
    ranked.truncate(top_n);
    ranked
}

/// Zip the four top-7 lists positionally into a 7-day grid. A category with
/// fewer than 7 qualifying items leaves null slots from that position on.
pub fn build_week_grid(tops: &[Vec<RankedItem>; 4]) -> Vec<DayMenu> {
    let [breakfast, lunch, snack, dinner] = tops;
    DAYS.iter()
        .enumerate()
        .map(|(i, &day)| DayMenu {
            day,
            breakfast: breakfast.get(i).cloned(),
            lunch: lunch.get(i).cloned(),
            snack: snack.get(i).cloned(),
            dinner: dinner.get(i).cloned(),
        })
        .collect()
}

/// Flatten a day grid into the lock-order item list, skipping null slots.
pub fn flatten_grid(grid: &[DayMenu]) -> Vec<RankedItem> {
    let mut flat = Vec::new();
    for day in grid {
        for slot in [&day.breakfast, &day.lunch, &day.snack, &day.dinner] {
            if let Some(item) = slot {
                flat.push(item.clone());
            }
        }
    }
    flat
}

/// Top `n` ids of a count map, descending by count, ties broken by ascending id.
pub fn top_items(counts: &HashMap<Uuid, i64>, n: usize) -> Vec<Uuid> {
    let mut entries: Vec<(&Uuid, &i64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    entries.into_iter().take(n).map(|(id, _)| *id).collect()
}

pub struct AggregationService;

impl AggregationService {
    /// Turn a month's selection ballots into a ranked 7-day proposal.
    /// Pure read/compute — nothing is persisted until the admin locks.
    pub async fn generate_monthly(pool: &PgPool, month: &str) -> ServiceResult<MonthlyProposal> {
        let ballots = BallotService::list_monthly_selections(pool, month).await?;
        let catalog = CatalogService::list(pool).await?;

        let counts = tally(&ballots);
        let tops = MealCategory::ALL
            .map(|category| rank_category(&catalog, &counts, category, ITEMS_PER_CATEGORY));
        let week_menu = build_week_grid(&tops);
        let suggested_items = flatten_grid(&week_menu);

        Ok(MonthlyProposal {
            suggested_items,
            week_menu,
            counts,
        })
    }

    /// Rank the week's disliked items and suggested replacements, top 3 each.
    pub async fn generate_weekly(
        pool: &PgPool,
        month: &str,
        week: i32,
    ) -> ServiceResult<WeeklyProposal> {
        let feedback =
            BallotService::list_for_period(pool, month, week, BallotType::Feedback).await?;
        let replacement =
            BallotService::list_for_period(pool, month, week, BallotType::Replacement).await?;

        let dislike_counts = tally(&feedback);
        let replacement_counts = tally(&replacement);

        Ok(WeeklyProposal {
            disliked: top_items(&dislike_counts, 3),
            replacements: top_items(&replacement_counts, 3),
            dislike_counts,
            replacement_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn item(n: u128, category: MealCategory) -> FoodItem {
        FoodItem {
            id: id(n),
            name: format!("item-{n}"),
            category: category.as_str().to_string(),
            diet_type: "Veg".to_string(),
            image: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ballot(n: u128, items: Vec<Uuid>) -> Ballot {
        Ballot {
            id: id(1000 + n),
            student_id: id(2000 + n),
            month: "2025-06".to_string(),
            week: 1,
            ballot_type: BallotType::MonthlySelection.to_string(),
            items,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn tally_counts_each_ballot_once_per_item() {
        let ballots = vec![
            ballot(0, vec![id(1), id(2)]),
            ballot(1, vec![id(1)]),
            // Duplicate within one ballot still counts once.
            ballot(2, vec![id(1), id(1)]),
        ];
        let counts = tally(&ballots);
        assert_eq!(counts[&id(1)], 3);
        assert_eq!(counts[&id(2)], 1);
    }

    #[test]
    fn higher_voted_item_ranks_first() {
        // Three ballots for A, one for B, both Breakfast.
        let catalog = vec![item(1, MealCategory::Breakfast), item(2, MealCategory::Breakfast)];
        let ballots = vec![
            ballot(0, vec![id(1)]),
            ballot(1, vec![id(1)]),
            ballot(2, vec![id(1)]),
            ballot(3, vec![id(2)]),
        ];
        let counts = tally(&ballots);
        assert_eq!(counts[&id(1)], 3);
        assert_eq!(counts[&id(2)], 1);

        let ranked = rank_category(&catalog, &counts, MealCategory::Breakfast, 7);
        assert_eq!(ranked[0].item.id, id(1));
        assert_eq!(ranked[0].vote_count, 3);
        assert_eq!(ranked[1].item.id, id(2));
    }

    #[test]
    fn ties_break_by_ascending_item_id() {
        let catalog = vec![item(9, MealCategory::Snack), item(3, MealCategory::Snack)];
        let counts = HashMap::from([(id(9), 2), (id(3), 2)]);

        let ranked = rank_category(&catalog, &counts, MealCategory::Snack, 7);
        assert_eq!(ranked[0].item.id, id(3));
        assert_eq!(ranked[1].item.id, id(9));
    }

    #[test]
    fn rank_caps_at_top_n_and_stays_within_catalog() {
        let catalog: Vec<FoodItem> =
            (0..9).map(|n| item(n, MealCategory::Lunch)).collect();
        // Votes reference an id the catalog does not know.
        let ballots = vec![ballot(0, vec![id(0), id(500)])];
        let counts = tally(&ballots);

        let ranked = rank_category(&catalog, &counts, MealCategory::Lunch, ITEMS_PER_CATEGORY);
        assert_eq!(ranked.len(), 7);
        assert!(ranked.iter().all(|r| catalog.iter().any(|c| c.id == r.item.id)));
    }

    #[test]
    fn short_category_leaves_null_slots() {
        let breakfast: Vec<RankedItem> = (0..7)
            .map(|n| RankedItem { item: item(n, MealCategory::Breakfast), vote_count: 0 })
            .collect();
        let lunch: Vec<RankedItem> = (10..15)
            .map(|n| RankedItem { item: item(n, MealCategory::Lunch), vote_count: 0 })
            .collect();
        let tops = [breakfast, lunch, Vec::new(), Vec::new()];

        let grid = build_week_grid(&tops);
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0].day, "Monday");
        assert!(grid[4].lunch.is_some());
        assert!(grid[5].lunch.is_none());
        assert!(grid.iter().all(|d| d.snack.is_none() && d.dinner.is_none()));

        // Flattening skips the empty slots: 7 breakfasts + 5 lunches.
        assert_eq!(flatten_grid(&grid).len(), 12);
    }

    #[test]
    fn aggregation_is_deterministic_for_identical_ballots() {
        let catalog: Vec<FoodItem> =
            (0..8).map(|n| item(n, MealCategory::Dinner)).collect();
        let ballots = vec![
            ballot(0, vec![id(0), id(3), id(5)]),
            ballot(1, vec![id(3)]),
        ];

        let first = tally(&ballots);
        let second = tally(&ballots);
        assert_eq!(first, second);

        let ranked_a = rank_category(&catalog, &first, MealCategory::Dinner, 7);
        let ranked_b = rank_category(&catalog, &second, MealCategory::Dinner, 7);
        let ids_a: Vec<Uuid> = ranked_a.iter().map(|r| r.item.id).collect();
        let ids_b: Vec<Uuid> = ranked_b.iter().map(|r| r.item.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn top_items_takes_three_with_deterministic_ties() {
        let counts = HashMap::from([(id(1), 5), (id(2), 5), (id(3), 2), (id(4), 1)]);
        assert_eq!(top_items(&counts, 3), vec![id(1), id(2), id(3)]);
    }
}
