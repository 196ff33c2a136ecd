use time::{Date, Duration};

use crate::meals::types::{
    Ingredient, IngredientQuantity, IngredientUnit, Macros, Meal, MealType,
};

fn oats() -> IngredientQuantity {
    IngredientQuantity {
        quantity: 1.0,
        ingredient: Ingredient {
            name: "Oats".into(),
            unit: IngredientUnit::Grams,
            calories: 150.0,
            protein: 5.0,
            carbs: 27.0,
            fat: 3.0,
        },
    }
}

/// Two weeks of demo meals starting at `today`: breakfast, lunch and dinner
/// for each day.
pub fn demo_meals(today: Date) -> Vec<Meal> {
    let macros = Macros { calories: 300.0, protein: 10.0, carbs: 54.0, fat: 6.0 };
    let mut meals = Vec::with_capacity(42);
    for day in 0..14i64 {
        let date = today + Duration::days(day);
        let n = day + 1;
        meals.push(Meal {
            id: format!("{}", day * 3 + 1),
            date,
            meal_type: MealType::Breakfast,
            name: format!("Breakfast Day {n}"),
            description: format!("Healthy breakfast for day {n}"),
            servings: 2,
            selected: false,
            ingredients: vec![oats()],
            macros,
        });
        meals.push(Meal {
            id: format!("{}", day * 3 + 2),
            date,
            meal_type: MealType::Lunch,
            name: format!("Lunch Day {n}"),
            description: format!("Nutritious lunch for day {n}"),
            servings: 1,
            selected: true,
            ingredients: vec![oats()],
            macros,
        });
        meals.push(Meal {
            id: format!("{}", day * 3 + 3),
            date,
            meal_type: MealType::Dinner,
            name: format!("Dinner Day {n}"),
            description: format!("Delicious dinner for day {n}"),
            servings: 3,
            selected: true,
            ingredients: vec![oats()],
            macros,
        });
    }
    meals
}

#[cfg(test)]
mod fixtures_tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn demo_set_covers_two_weeks_with_three_meals_per_day() {
        let today = date!(2026 - 09 - 01);
        let meals = demo_meals(today);
        assert_eq!(meals.len(), 42);
        assert!(meals.iter().all(|m| m.date >= today));
        assert!(meals.iter().all(|m| m.date < today + time::Duration::days(14)));
        let breakfasts = meals.iter().filter(|m| m.meal_type == MealType::Breakfast).count();
        assert_eq!(breakfasts, 14);
    }

    #[test]
    fn demo_ids_are_unique() {
        let meals = demo_meals(date!(2026 - 09 - 01));
        let ids: std::collections::HashSet<_> = meals.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), meals.len());
    }
}
