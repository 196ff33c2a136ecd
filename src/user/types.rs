use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Every snack kind starts at this quantity when a profile is created.
pub const DEFAULT_SNACK_QUANTITY: u32 = 5;
pub const DUCK_MAX_HEALTH: u32 = 100;
/// Health restored by one snack.
pub const FEED_HEALTH_BONUS: u32 = 10;
/// Health lost per full hour without any meal-logging activity.
pub const DECAY_PER_IDLE_HOUR: u32 = 1;

/// Snacks the duck accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Snack {
    Cookie,
    Apple,
    Banana,
    Drumstick,
    CupSoda,
}

impl Snack {
    pub const ALL: [Snack; 5] = [
        Snack::Cookie,
        Snack::Apple,
        Snack::Banana,
        Snack::Drumstick,
        Snack::CupSoda,
    ];
}

/// The signed-in user's profile, including the duck's pantry and health.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub snacks: HashMap<Snack, u32>,
    pub duck_health: u32,
}

/// Profile fields supplied at creation; the snack pantry is initialized by
/// the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSeed {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub duck_health: u32,
}
