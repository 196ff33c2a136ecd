use serde::{Deserialize, Serialize};

/// Coarse diet tag carried by pantry and shopping items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietTag {
    Vegan,
    Vegetarian,
    None,
}

/// An ingredient the user owns (inventory) or still has to buy (shopping
/// list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: u64,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub diet: DietTag,
}

impl PantryItem {
    pub fn new(id: u64, name: &str, amount: f64, unit: &str, diet: DietTag) -> Self {
        Self {
            id,
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
            diet,
        }
    }
}
