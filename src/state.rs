use std::sync::{Arc, RwLock};

use time::OffsetDateTime;

use crate::config::AppConfig;
use crate::inventory::store::InventoryStore;
use crate::meals::fixtures::demo_meals;
use crate::meals::planner::local_today;
use crate::meals::store::MealStore;
use crate::preferences::types::Preferences;
use crate::user::store::UserStore;
use crate::user::types::ProfileSeed;

/// Shared application state: every store lives behind its own lock, there
/// is one logical writer (the request handlers) and nothing holds a lock
/// across an await.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub meals: Arc<RwLock<MealStore>>,
    pub profile: Arc<RwLock<UserStore>>,
    pub preferences: Arc<RwLock<Option<Preferences>>>,
    pub inventory: Arc<RwLock<InventoryStore>>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let state = Self::from_config(config);
        if state.config.seed_demo_data {
            state.seed_demo();
        }
        Ok(state)
    }

    fn from_config(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            meals: Arc::new(RwLock::new(MealStore::new())),
            profile: Arc::new(RwLock::new(UserStore::new(OffsetDateTime::now_utc()))),
            preferences: Arc::new(RwLock::new(None)),
            inventory: Arc::new(RwLock::new(InventoryStore::new())),
        }
    }

    fn seed_demo(&self) {
        let today = local_today();
        self.meals
            .write()
            .expect("meal store lock poisoned")
            .set_meals(demo_meals(today));
        self.profile.write().expect("profile lock poisoned").set_user(
            ProfileSeed {
                id: "1".into(),
                email: "duck@example.com".into(),
                name: "Duck Robert".into(),
                avatar_url: None,
                duck_health: 30,
            },
            OffsetDateTime::now_utc(),
        );
        *self.inventory.write().expect("inventory lock poisoned") = InventoryStore::demo();
    }

    /// Fully seeded state for tests, no environment involved.
    pub fn demo() -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            login_reject_email: "fail@example.com".into(),
            seed_demo_data: true,
        });
        let state = Self::from_config(config);
        state.seed_demo();
        state
    }
}
