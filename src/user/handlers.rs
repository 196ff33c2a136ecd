use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::state::AppState;
use crate::user::store::FeedError;
use crate::user::types::{Profile, Snack};

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/duck/feed", post(feed_duck))
        .route("/me/snacks/:snack", axum::routing::put(set_snack))
        .route("/me/snacks/:snack/add", post(add_snacks))
}

#[derive(Debug, Deserialize)]
pub struct FeedRequest {
    pub snack: Snack,
}

#[derive(Debug, Deserialize)]
pub struct SetSnackRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct AddSnackRequest {
    #[serde(default = "one")]
    pub amount: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct SnackResponse {
    pub snack: Snack,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub duck_health: u32,
    pub remaining: u32,
}

/// Current profile with duck health settled to "now".
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
) -> Result<Json<Profile>, (StatusCode, String)> {
    let store = state.profile.read().expect("profile lock poisoned");
    match store.profile_at(OffsetDateTime::now_utc()) {
        Some(profile) => Ok(Json(profile)),
        None => Err((StatusCode::NOT_FOUND, "User not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn feed_duck(
    State(state): State<AppState>,
    Json(payload): Json<FeedRequest>,
) -> Result<Json<FeedResponse>, (StatusCode, String)> {
    let now = OffsetDateTime::now_utc();
    let mut store = state.profile.write().expect("profile lock poisoned");
    match store.feed_duck(payload.snack, now) {
        Ok(duck_health) => {
            info!(snack = ?payload.snack, duck_health, "duck fed");
            Ok(Json(FeedResponse {
                duck_health,
                remaining: store.snack_quantity(payload.snack),
            }))
        }
        Err(e @ FeedError::NoProfile) => Err((StatusCode::NOT_FOUND, e.to_string())),
        Err(e @ FeedError::PantryEmpty(_)) => {
            warn!(snack = ?payload.snack, "pantry empty");
            Err((StatusCode::CONFLICT, e.to_string()))
        }
    }
}

/// Overwrite the pantry count for one snack kind.
#[instrument(skip(state))]
pub async fn set_snack(
    State(state): State<AppState>,
    Path(snack): Path<Snack>,
    Json(payload): Json<SetSnackRequest>,
) -> Json<SnackResponse> {
    let mut store = state.profile.write().expect("profile lock poisoned");
    store.set_snack_quantity(snack, payload.quantity);
    Json(SnackResponse { snack, quantity: store.snack_quantity(snack) })
}

/// Restock a snack, e.g. after a shopping trip.
#[instrument(skip(state))]
pub async fn add_snacks(
    State(state): State<AppState>,
    Path(snack): Path<Snack>,
    Json(payload): Json<AddSnackRequest>,
) -> Json<SnackResponse> {
    let mut store = state.profile.write().expect("profile lock poisoned");
    store.increment_snack(snack, payload.amount);
    Json(SnackResponse { snack, quantity: store.snack_quantity(snack) })
}
