use serde::{Deserialize, Serialize};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::meals::planner::DayColumn;
use crate::meals::types::{
    Ingredient, IngredientQuantity, IngredientUnit, Macros, Meal, MealType,
};

#[derive(Debug, thiserror::Error)]
#[error("invalid date: {0:?}")]
pub struct InvalidDate(String);

/// Parse an upstream date string. The upstream feed is loose about the
/// format, so ISO dates, RFC 2822 and RFC 3339 timestamps are all accepted;
/// any time-of-day component is dropped on the floor.
pub fn parse_upstream_date(s: &str) -> Result<Date, InvalidDate> {
    let ymd = format_description!("[year]-[month]-[day]");
    if let Ok(d) = Date::parse(s, &ymd) {
        return Ok(d);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc2822) {
        return Ok(dt.date());
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(dt.date());
    }
    Err(InvalidDate(s.to_string()))
}

/// Ingredient as the upstream feed ships it: per-100g nutrients plus flags
/// we do not care about.
#[derive(Debug, Deserialize)]
pub struct UpstreamIngredient {
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamIngredientQuantity {
    pub ingredient: UpstreamIngredient,
    /// Grams.
    #[serde(default)]
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamMeal {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub meal_type: String,
    /// Maps to servings.
    pub people: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<UpstreamIngredientQuantity>,
}

/// The feed is served either as a bare array or wrapped in `{"meals": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImportRequest {
    List(Vec<UpstreamMeal>),
    Wrapped { meals: Vec<UpstreamMeal> },
}

impl ImportRequest {
    pub fn into_meals(self) -> Vec<UpstreamMeal> {
        match self {
            ImportRequest::List(meals) => meals,
            ImportRequest::Wrapped { meals } => meals,
        }
    }
}

fn sum_macros(ingredients: &[UpstreamIngredientQuantity]) -> Macros {
    let mut totals = Macros::default();
    for item in ingredients {
        // nutrients are per 100g
        let factor = item.quantity / 100.0;
        totals.calories += item.ingredient.calories * factor;
        totals.protein += item.ingredient.protein * factor;
        totals.carbs += item.ingredient.carbs * factor;
        totals.fat += item.ingredient.fat * factor;
    }
    totals
}

impl UpstreamMeal {
    /// Normalize the upstream record into our meal shape: date-only date,
    /// lenient meal type, summed macro totals, selection reset.
    pub fn into_meal(self) -> Result<Meal, InvalidDate> {
        let date = parse_upstream_date(&self.date)?;
        let macros = sum_macros(&self.ingredients);
        Ok(Meal {
            id: self.id.to_string(),
            date,
            meal_type: MealType::parse_lenient(&self.meal_type),
            name: self.name,
            description: self.description,
            servings: self.people.unwrap_or(1),
            selected: false,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|it| IngredientQuantity {
                    quantity: it.quantity,
                    ingredient: Ingredient {
                        name: it.ingredient.name,
                        unit: IngredientUnit::Grams,
                        calories: it.ingredient.calories,
                        protein: it.ingredient.protein,
                        carbs: it.ingredient.carbs,
                        fat: it.ingredient.fat,
                    },
                })
                .collect(),
            macros,
        })
    }
}

/// Full meal record for `POST /meals`. A blank id asks the server to assign
/// one.
#[derive(Debug, Deserialize)]
pub struct PutMealRequest {
    #[serde(default)]
    pub id: String,
    pub date: Date,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub ingredients: Vec<IngredientQuantity>,
    #[serde(default)]
    pub macros: Macros,
}

fn default_servings() -> u32 {
    1
}

impl PutMealRequest {
    pub fn into_meal(self, id: String) -> Meal {
        Meal {
            id,
            date: self.date,
            meal_type: self.meal_type,
            name: self.name,
            description: self.description,
            servings: self.servings,
            selected: self.selected,
            ingredients: self.ingredients,
            macros: self.macros,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpsertMealResponse {
    pub id: String,
}

/// One `(id, date, type)` triple of the bulk save payload.
#[derive(Debug, Deserialize)]
pub struct BulkSaveItem {
    pub id: String,
    pub date: Date,
    #[serde(rename = "type")]
    pub meal_type: MealType,
}

#[derive(Debug, Deserialize)]
pub struct BulkSaveRequest {
    #[serde(default)]
    pub items: Vec<BulkSaveItem>,
}

#[derive(Debug, Serialize)]
pub struct PlanCell {
    pub id: String,
    pub name: String,
    pub selected: bool,
    pub servings: u32,
    pub macros: Macros,
}

/// One grid row: a meal type plus one cell per column, empty cells included.
#[derive(Debug, Serialize)]
pub struct PlanRow {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub cells: Vec<Option<PlanCell>>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub columns: Vec<DayColumn>,
    pub rows: Vec<PlanRow>,
}
