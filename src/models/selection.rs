use thiserror::Error;
use uuid::Uuid;

use super::food_item::{DietType, MealCategory};
use super::menu::{ITEMS_PER_CATEGORY, MENU_SIZE};

/// A student's in-progress monthly selection, independent of any UI.
///
/// Mirrors the rules the dashboard enforces while picking: 7 items per
/// category, at most 2 non-veg lunches and 1 non-veg dinner.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    picks: Vec<Pick>,
}

#[derive(Debug, Clone, Copy)]
struct Pick {
    id: Uuid,
    category: MealCategory,
    diet: DietType,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("You can only select {limit} items for {category}")]
    CategoryFull { category: MealCategory, limit: usize },
    #[error("Only {limit} non-veg item(s) allowed for {category}")]
    NonVegLimit { category: MealCategory, limit: usize },
}

/// Non-veg cap per category, where one applies.
fn non_veg_limit(category: MealCategory) -> Option<usize> {
    match category {
        MealCategory::Lunch => Some(2),
        MealCategory::Dinner => Some(1),
        _ => None,
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Re-adding an already selected id is a no-op.
    pub fn add(
        &mut self,
        id: Uuid,
        category: MealCategory,
        diet: DietType,
    ) -> Result<(), SelectionError> {
        if self.picks.iter().any(|p| p.id == id) {
            return Ok(());
        }
        if self.count(category) >= ITEMS_PER_CATEGORY {
            return Err(SelectionError::CategoryFull {
                category,
                limit: ITEMS_PER_CATEGORY,
            });
        }
        if diet == DietType::NonVeg {
            if let Some(limit) = non_veg_limit(category) {
                let non_veg = self
                    .picks
                    .iter()
                    .filter(|p| p.category == category && p.diet == DietType::NonVeg)
                    .count();
                if non_veg >= limit {
                    return Err(SelectionError::NonVegLimit { category, limit });
                }
            }
        }
        self.picks.push(Pick { id, category, diet });
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) {
        self.picks.retain(|p| p.id != id);
    }

    pub fn count(&self, category: MealCategory) -> usize {
        self.picks.iter().filter(|p| p.category == category).count()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Selected ids in insertion order, ready to submit as a monthly ballot.
    pub fn ids(&self) -> Vec<Uuid> {
        self.picks.iter().map(|p| p.id).collect()
    }

    /// True once all four categories hold their full 7 picks.
    pub fn is_complete(&self) -> bool {
        self.len() == MENU_SIZE
            && MealCategory::ALL
                .iter()
                .all(|&c| self.count(c) == ITEMS_PER_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn add_remove_and_count() {
        let mut sel = SelectionSet::new();
        sel.add(id(1), MealCategory::Breakfast, DietType::Veg).unwrap();
        sel.add(id(2), MealCategory::Breakfast, DietType::Veg).unwrap();
        sel.add(id(3), MealCategory::Lunch, DietType::Veg).unwrap();

        assert_eq!(sel.count(MealCategory::Breakfast), 2);
        assert_eq!(sel.count(MealCategory::Lunch), 1);

        sel.remove(id(1));
        assert_eq!(sel.count(MealCategory::Breakfast), 1);
        assert_eq!(sel.ids(), vec![id(2), id(3)]);
    }

    #[test]
    fn re_adding_same_id_does_not_duplicate() {
        let mut sel = SelectionSet::new();
        sel.add(id(1), MealCategory::Snack, DietType::Veg).unwrap();
        sel.add(id(1), MealCategory::Snack, DietType::Veg).unwrap();
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn category_caps_at_seven() {
        let mut sel = SelectionSet::new();
        for n in 0..7 {
            sel.add(id(n), MealCategory::Breakfast, DietType::Veg).unwrap();
        }
        let err = sel.add(id(7), MealCategory::Breakfast, DietType::Veg).unwrap_err();
        assert_eq!(
            err,
            SelectionError::CategoryFull {
                category: MealCategory::Breakfast,
                limit: 7
            }
        );
    }

    #[test]
    fn non_veg_caps_for_lunch_and_dinner() {
        let mut sel = SelectionSet::new();
        sel.add(id(1), MealCategory::Lunch, DietType::NonVeg).unwrap();
        sel.add(id(2), MealCategory::Lunch, DietType::NonVeg).unwrap();
        let err = sel.add(id(3), MealCategory::Lunch, DietType::NonVeg).unwrap_err();
        assert_eq!(
            err,
            SelectionError::NonVegLimit {
                category: MealCategory::Lunch,
                limit: 2
            }
        );

        sel.add(id(4), MealCategory::Dinner, DietType::NonVeg).unwrap();
        let err = sel.add(id(5), MealCategory::Dinner, DietType::NonVeg).unwrap_err();
        assert_eq!(
            err,
            SelectionError::NonVegLimit {
                category: MealCategory::Dinner,
                limit: 1
            }
        );

        // Veg picks are unaffected by the non-veg caps.
        sel.add(id(6), MealCategory::Lunch, DietType::Veg).unwrap();
    }

    #[test]
    fn is_complete_requires_seven_per_category() {
        let mut sel = SelectionSet::new();
        let mut n = 0u128;
        for &cat in &MealCategory::ALL {
            for _ in 0..7 {
                sel.add(id(n), cat, DietType::Veg).unwrap();
                n += 1;
            }
        }
        assert!(sel.is_complete());

        sel.remove(id(0));
        assert!(!sel.is_complete());
    }
}
