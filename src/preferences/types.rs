use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` pair, serialized as a two-element JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range(pub u32, pub u32);

impl Range {
    pub fn min(&self) -> u32 {
        self.0
    }

    pub fn max(&self) -> u32 {
        self.1
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PreferencesError {
    #[error("{0}: min must be less than max")]
    InvertedRange(&'static str),
    #[error("{0}: range must be between 0 and 100")]
    PercentOutOfBounds(&'static str),
    #[error("calories: range must be 800-5000 kcal")]
    CaloriesOutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryPrefs {
    pub vegetarian: bool,
    pub vegan: bool,
    pub celiac: bool,
    pub lactose: bool,
    pub soy: bool,
}

/// Target ranges as percent of daily calories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroRanges {
    pub protein: Range,
    pub fat: Range,
    pub carbs: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dietary: DietaryPrefs,
    pub macros: MacroRanges,
    pub calories: Range,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dietary: DietaryPrefs {
                vegetarian: false,
                vegan: false,
                celiac: false,
                lactose: false,
                soy: false,
            },
            macros: MacroRanges {
                protein: Range(20, 30),
                fat: Range(20, 35),
                carbs: Range(40, 60),
            },
            calories: Range(1800, 2400),
        }
    }
}

fn check_pct(field: &'static str, range: Range) -> Result<(), PreferencesError> {
    if range.min() >= range.max() {
        return Err(PreferencesError::InvertedRange(field));
    }
    if range.max() > 100 {
        return Err(PreferencesError::PercentOutOfBounds(field));
    }
    Ok(())
}

impl Preferences {
    /// Form-level validation; the first violation blocks the save.
    pub fn validate(&self) -> Result<(), PreferencesError> {
        check_pct("protein", self.macros.protein)?;
        check_pct("fat", self.macros.fat)?;
        check_pct("carbs", self.macros.carbs)?;
        if self.calories.min() >= self.calories.max() {
            return Err(PreferencesError::InvertedRange("calories"));
        }
        if self.calories.min() < 800 || self.calories.max() > 5000 {
            return Err(PreferencesError::CaloriesOutOfBounds);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PartialDietary {
    pub vegetarian: Option<bool>,
    pub vegan: Option<bool>,
    pub celiac: Option<bool>,
    pub lactose: Option<bool>,
    pub soy: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PartialMacroRanges {
    pub protein: Option<Range>,
    pub fat: Option<Range>,
    pub carbs: Option<Range>,
}

/// Optional-field-tolerant document: anything missing falls back to the
/// matching default before the document is stored or returned.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PartialPreferences {
    pub dietary: Option<PartialDietary>,
    pub macros: Option<PartialMacroRanges>,
    pub calories: Option<Range>,
}

impl PartialPreferences {
    pub fn or_defaults(self) -> Preferences {
        let defaults = Preferences::default();
        let dietary = self.dietary.unwrap_or_default();
        let macros = self.macros.unwrap_or_default();
        Preferences {
            dietary: DietaryPrefs {
                vegetarian: dietary.vegetarian.unwrap_or(defaults.dietary.vegetarian),
                vegan: dietary.vegan.unwrap_or(defaults.dietary.vegan),
                celiac: dietary.celiac.unwrap_or(defaults.dietary.celiac),
                lactose: dietary.lactose.unwrap_or(defaults.dietary.lactose),
                soy: dietary.soy.unwrap_or(defaults.dietary.soy),
            },
            macros: MacroRanges {
                protein: macros.protein.unwrap_or(defaults.macros.protein),
                fat: macros.fat.unwrap_or(defaults.macros.fat),
                carbs: macros.carbs.unwrap_or(defaults.macros.carbs),
            },
            calories: self.calories.unwrap_or(defaults.calories),
        }
    }
}
