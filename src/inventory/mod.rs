pub mod handlers;
pub mod store;
pub mod types;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::inventory_routes()
}
