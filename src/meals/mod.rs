mod dto;
pub mod fixtures;
pub mod handlers;
pub mod planner;
pub mod store;
pub mod types;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
