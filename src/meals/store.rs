use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::meals::types::{Meal, MealPatch};

/// Snapshot of the full collection, keyed by meal id.
pub type MealMap = HashMap<String, Meal>;

/// In-memory keyed collection of meals.
///
/// Every effective mutation clones the map, applies the change and swaps the
/// `Arc`, so a consumer holding a previous [`MealStore::snapshot`] can detect
/// change with `Arc::ptr_eq`. Ineffective operations (patching or removing an
/// unknown id) leave the current snapshot in place.
#[derive(Debug, Clone, Default)]
pub struct MealStore {
    meals: Arc<MealMap>,
}

impl MealStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap handle to the current collection.
    pub fn snapshot(&self) -> Arc<MealMap> {
        Arc::clone(&self.meals)
    }

    /// Discard the collection and rebuild it from `meals`. Duplicate ids are
    /// not validated; the last record wins.
    pub fn set_meals(&mut self, meals: Vec<Meal>) {
        self.meals = Arc::new(meals.into_iter().map(|m| (m.id.clone(), m)).collect());
    }

    /// Insert `meal`, replacing any existing entry with the same id.
    pub fn upsert(&mut self, meal: Meal) {
        let mut next = MealMap::clone(&self.meals);
        next.insert(meal.id.clone(), meal);
        self.meals = Arc::new(next);
    }

    /// Merge `patch` onto the meal with `id`, keeping the id itself.
    ///
    /// Patching an unknown id is a no-op: the collection is left untouched
    /// and a warning is emitted in debug builds only. Returns whether a meal
    /// was updated.
    pub fn patch(&mut self, id: &str, patch: MealPatch) -> bool {
        if !self.meals.contains_key(id) {
            if cfg!(debug_assertions) {
                warn!(%id, "patch: meal not found, call upsert first");
            }
            return false;
        }
        let mut next = MealMap::clone(&self.meals);
        if let Some(meal) = next.get_mut(id) {
            meal.apply(patch);
        }
        self.meals = Arc::new(next);
        true
    }

    /// Delete the meal with `id` if present. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.meals.contains_key(id) {
            return false;
        }
        let mut next = MealMap::clone(&self.meals);
        next.remove(id);
        self.meals = Arc::new(next);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Meal> {
        self.meals.get(id)
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Meal> {
        self.meals.values()
    }

    /// Number of meals currently marked for the active plan.
    pub fn selected_count(&self) -> usize {
        self.meals.values().filter(|m| m.selected).count()
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::meals::types::{Macros, MealType};
    use time::macros::date;

    fn meal(id: &str) -> Meal {
        Meal {
            id: id.to_string(),
            date: date!(2026 - 09 - 01),
            meal_type: MealType::Lunch,
            name: format!("Meal {id}"),
            description: String::new(),
            servings: 1,
            selected: false,
            ingredients: vec![],
            macros: Macros::default(),
        }
    }

    #[test]
    fn keys_always_match_entry_ids() {
        let mut store = MealStore::new();
        store.set_meals(vec![meal("a"), meal("b")]);
        store.upsert(meal("c"));
        store.patch("a", MealPatch { selected: Some(true), ..Default::default() });
        store.remove("b");
        for (key, m) in store.snapshot().iter() {
            assert_eq!(key, &m.id);
        }
    }

    #[test]
    fn set_meals_last_write_wins_on_duplicate_ids() {
        let mut store = MealStore::new();
        let mut second = meal("a");
        second.name = "second".into();
        store.set_meals(vec![meal("a"), second]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().name, "second");
    }

    #[test]
    fn replace_all_then_lookup() {
        let mut store = MealStore::new();
        store.set_meals(vec![meal("a"), meal("b")]);
        assert!(store.get("a").is_some());
        assert!(store.get("b").is_some());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn patch_merges_and_preserves_id() {
        let mut store = MealStore::new();
        store.set_meals(vec![meal("a")]);
        let updated = store.patch(
            "a",
            MealPatch { servings: Some(4), name: Some("Updated".into()), ..Default::default() },
        );
        assert!(updated);
        let m = store.get("a").unwrap();
        assert_eq!(m.id, "a");
        assert_eq!(m.servings, 4);
        assert_eq!(m.name, "Updated");
        // untouched fields survive
        assert_eq!(m.meal_type, MealType::Lunch);
    }

    #[test]
    fn patch_missing_id_leaves_collection_unchanged() {
        let mut store = MealStore::new();
        store.set_meals(vec![meal("a")]);
        let before = store.snapshot();
        assert!(!store.patch("ghost", MealPatch { selected: Some(true), ..Default::default() }));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut store = MealStore::new();
        store.set_meals(vec![meal("a")]);
        let before = store.snapshot();
        assert!(!store.remove("ghost"));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert!(store.remove("a"));
        assert!(store.is_empty());
    }

    #[test]
    fn effective_mutations_produce_new_snapshots() {
        let mut store = MealStore::new();
        store.set_meals(vec![meal("a")]);
        let before = store.snapshot();
        store.upsert(meal("b"));
        assert!(!Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn upsert_replaces_existing_record() {
        let mut store = MealStore::new();
        store.set_meals(vec![meal("a")]);
        let mut replacement = meal("a");
        replacement.selected = true;
        replacement.servings = 3;
        store.upsert(replacement);
        let m = store.get("a").unwrap();
        assert!(m.selected);
        assert_eq!(m.servings, 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn selected_count_tracks_flags() {
        let mut store = MealStore::new();
        let mut b = meal("b");
        b.selected = true;
        store.set_meals(vec![meal("a"), b]);
        assert_eq!(store.selected_count(), 1);
        store.patch("a", MealPatch { selected: Some(true), ..Default::default() });
        assert_eq!(store.selected_count(), 2);
    }
}
