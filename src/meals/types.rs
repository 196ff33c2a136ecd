use serde::{Deserialize, Serialize};
use time::Date;

/// Servings bounds enforced by the planning UI steppers.
pub const MIN_SERVINGS: u32 = 1;
pub const MAX_SERVINGS: u32 = 12;

/// Slot of the day a meal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// Row order of the planning grid.
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    /// Tolerant parse for upstream payloads: unknown values fall back to lunch.
    pub fn parse_lenient(s: &str) -> MealType {
        s.parse().unwrap_or(MealType::Lunch)
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown meal type: {0:?}")]
pub struct ParseMealTypeError(String);

impl std::str::FromStr for MealType {
    type Err = ParseMealTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(ParseMealTypeError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientUnit {
    Grams,
    Milliliters,
    Pieces,
}

/// Nutrients are per 100 g of the ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub unit: IngredientUnit,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    pub quantity: f64,
    pub ingredient: Ingredient,
}

/// Aggregate totals for a meal. Kept as plain numbers; the store never
/// recomputes them from the ingredient list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// One planned meal. `date` carries date-only semantics; time of day is
/// normalized away before anything is compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub date: Date,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    pub description: String,
    pub servings: u32,
    pub selected: bool,
    pub ingredients: Vec<IngredientQuantity>,
    pub macros: Macros,
}

/// Partial update for a meal. Absent fields keep their current value; the
/// id is never part of a patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealPatch {
    pub date: Option<Date>,
    #[serde(rename = "type")]
    pub meal_type: Option<MealType>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub servings: Option<u32>,
    pub selected: Option<bool>,
    pub ingredients: Option<Vec<IngredientQuantity>>,
    pub macros: Option<Macros>,
}

impl Meal {
    /// Merge `patch` onto this meal. Provided collections (ingredients)
    /// replace the old ones wholesale, mirroring a shallow merge.
    pub fn apply(&mut self, patch: MealPatch) {
        let MealPatch {
            date,
            meal_type,
            name,
            description,
            servings,
            selected,
            ingredients,
            macros,
        } = patch;
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(meal_type) = meal_type {
            self.meal_type = meal_type;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(servings) = servings {
            self.servings = servings;
        }
        if let Some(selected) = selected {
            self.selected = selected;
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = ingredients;
        }
        if let Some(macros) = macros {
            self.macros = macros;
        }
    }
}
