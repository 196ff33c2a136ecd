use std::collections::HashMap;

use time::OffsetDateTime;

use crate::user::types::{
    Profile, ProfileSeed, Snack, DECAY_PER_IDLE_HOUR, DEFAULT_SNACK_QUANTITY, DUCK_MAX_HEALTH,
    FEED_HEALTH_BONUS,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("no profile")]
    NoProfile,
    #[error("no {0:?} left in the pantry")]
    PantryEmpty(Snack),
}

/// Profile state plus the timestamp of the last meal-logging activity,
/// which drives duck health decay.
#[derive(Debug, Clone)]
pub struct UserStore {
    profile: Option<Profile>,
    last_activity: OffsetDateTime,
}

impl UserStore {
    pub fn new(now: OffsetDateTime) -> Self {
        Self { profile: None, last_activity: now }
    }

    /// Install a profile, initializing every snack kind at the default
    /// quantity.
    pub fn set_user(&mut self, seed: ProfileSeed, now: OffsetDateTime) {
        let snacks: HashMap<Snack, u32> = Snack::ALL
            .iter()
            .map(|&s| (s, DEFAULT_SNACK_QUANTITY))
            .collect();
        self.profile = Some(Profile {
            id: seed.id,
            email: seed.email,
            name: seed.name,
            avatar_url: seed.avatar_url,
            snacks,
            duck_health: seed.duck_health.min(DUCK_MAX_HEALTH),
        });
        self.last_activity = now;
    }

    pub fn clear(&mut self) {
        self.profile = None;
    }

    pub fn snack_quantity(&self, snack: Snack) -> u32 {
        self.profile
            .as_ref()
            .and_then(|p| p.snacks.get(&snack).copied())
            .unwrap_or(0)
    }

    pub fn increment_snack(&mut self, snack: Snack, amount: u32) {
        if let Some(profile) = self.profile.as_mut() {
            *profile.snacks.entry(snack).or_insert(0) += amount;
        }
    }

    /// Decrement, flooring at zero.
    pub fn decrement_snack(&mut self, snack: Snack, amount: u32) {
        if let Some(profile) = self.profile.as_mut() {
            let q = profile.snacks.entry(snack).or_insert(0);
            *q = q.saturating_sub(amount);
        }
    }

    pub fn set_snack_quantity(&mut self, snack: Snack, quantity: u32) {
        if let Some(profile) = self.profile.as_mut() {
            profile.snacks.insert(snack, quantity);
        }
    }

    pub fn set_duck_health(&mut self, health: u32) {
        if let Some(profile) = self.profile.as_mut() {
            profile.duck_health = health.min(DUCK_MAX_HEALTH);
        }
    }

    /// Duck health as of `now`: the stored value minus one point per full
    /// hour since the last meal-logging activity, floored at zero.
    pub fn duck_health_at(&self, now: OffsetDateTime) -> u32 {
        let Some(profile) = self.profile.as_ref() else {
            return 0;
        };
        let idle_hours = (now - self.last_activity).whole_hours().max(0) as u32;
        profile
            .duck_health
            .saturating_sub(idle_hours * DECAY_PER_IDLE_HOUR)
    }

    /// Meal logging counts as looking after the duck: the decayed health is
    /// settled into the profile and the idle clock restarts.
    pub fn record_meal_activity(&mut self, now: OffsetDateTime) {
        let settled = if self.profile.is_some() {
            Some(self.duck_health_at(now))
        } else {
            None
        };
        if let (Some(profile), Some(health)) = (self.profile.as_mut(), settled) {
            profile.duck_health = health;
        }
        self.last_activity = now;
    }

    /// Feed the duck one snack: consumes it and restores health, capped at
    /// the maximum. Also counts as activity.
    pub fn feed_duck(&mut self, snack: Snack, now: OffsetDateTime) -> Result<u32, FeedError> {
        if self.profile.is_none() {
            return Err(FeedError::NoProfile);
        }
        if self.snack_quantity(snack) == 0 {
            return Err(FeedError::PantryEmpty(snack));
        }
        let current = self.duck_health_at(now);
        self.decrement_snack(snack, 1);
        let next = (current + FEED_HEALTH_BONUS).min(DUCK_MAX_HEALTH);
        self.set_duck_health(next);
        self.last_activity = now;
        Ok(next)
    }

    /// Profile with health settled to `now`, ready to serialize.
    pub fn profile_at(&self, now: OffsetDateTime) -> Option<Profile> {
        let mut profile = self.profile.clone()?;
        profile.duck_health = self.duck_health_at(now);
        Some(profile)
    }
}

#[cfg(test)]
mod user_store_tests {
    use super::*;
    use time::macros::datetime;

    fn seed() -> ProfileSeed {
        ProfileSeed {
            id: "1".into(),
            email: "duck@example.com".into(),
            name: "Duck Robert".into(),
            avatar_url: None,
            duck_health: 30,
        }
    }

    #[test]
    fn set_user_initializes_every_snack_at_five() {
        let now = datetime!(2026-09-01 12:00 UTC);
        let mut store = UserStore::new(now);
        store.set_user(seed(), now);
        for snack in Snack::ALL {
            assert_eq!(store.snack_quantity(snack), DEFAULT_SNACK_QUANTITY);
        }
    }

    #[test]
    fn decrement_floors_at_zero() {
        let now = datetime!(2026-09-01 12:00 UTC);
        let mut store = UserStore::new(now);
        store.set_user(seed(), now);
        store.decrement_snack(Snack::Apple, 99);
        assert_eq!(store.snack_quantity(Snack::Apple), 0);
    }

    #[test]
    fn health_decays_one_point_per_idle_hour() {
        let start = datetime!(2026-09-01 12:00 UTC);
        let mut store = UserStore::new(start);
        store.set_user(seed(), start);
        assert_eq!(store.duck_health_at(start), 30);
        assert_eq!(store.duck_health_at(start + time::Duration::hours(5)), 25);
        assert_eq!(store.duck_health_at(start + time::Duration::hours(500)), 0);
    }

    #[test]
    fn logging_meals_settles_and_resets_decay() {
        let start = datetime!(2026-09-01 12:00 UTC);
        let mut store = UserStore::new(start);
        store.set_user(seed(), start);
        let later = start + time::Duration::hours(10);
        store.record_meal_activity(later);
        // settled to 20 at `later`, and no further decay until more idle time
        assert_eq!(store.duck_health_at(later), 20);
        assert_eq!(store.duck_health_at(later + time::Duration::hours(1)), 19);
    }

    #[test]
    fn feeding_consumes_a_snack_and_caps_health() {
        let now = datetime!(2026-09-01 12:00 UTC);
        let mut store = UserStore::new(now);
        store.set_user(seed(), now);
        store.set_duck_health(95);
        let health = store.feed_duck(Snack::Cookie, now).unwrap();
        assert_eq!(health, DUCK_MAX_HEALTH);
        assert_eq!(store.snack_quantity(Snack::Cookie), 4);
    }

    #[test]
    fn feeding_from_an_empty_pantry_fails() {
        let now = datetime!(2026-09-01 12:00 UTC);
        let mut store = UserStore::new(now);
        store.set_user(seed(), now);
        store.set_snack_quantity(Snack::Banana, 0);
        assert_eq!(
            store.feed_duck(Snack::Banana, now),
            Err(FeedError::PantryEmpty(Snack::Banana))
        );
        assert_eq!(store.duck_health_at(now), 30);
    }

    #[test]
    fn no_profile_reads_as_zero_health() {
        let now = datetime!(2026-09-01 12:00 UTC);
        let store = UserStore::new(now);
        assert_eq!(store.duck_health_at(now), 0);
        assert!(store.profile_at(now).is_none());
    }
}
