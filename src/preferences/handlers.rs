use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument, warn};

use crate::preferences::types::{PartialPreferences, Preferences};
use crate::state::AppState;

pub fn preferences_routes() -> Router<AppState> {
    Router::new().route("/preferences", get(get_preferences).post(save_preferences))
}

#[instrument(skip(state))]
pub async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    let stored = *state.preferences.read().expect("preferences lock poisoned");
    Json(stored.unwrap_or_default())
}

/// Store the dietary-and-macro document. Missing fields are back-filled with
/// defaults before validation; a validation failure blocks the save.
#[instrument(skip(state, payload))]
pub async fn save_preferences(
    State(state): State<AppState>,
    Json(payload): Json<PartialPreferences>,
) -> Result<StatusCode, (StatusCode, String)> {
    let prefs = payload.or_defaults();
    if let Err(e) = prefs.validate() {
        warn!(error = %e, "preferences rejected");
        return Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
    }
    *state.preferences.write().expect("preferences lock poisoned") = Some(prefs);
    info!("preferences saved");
    Ok(StatusCode::NO_CONTENT)
}
