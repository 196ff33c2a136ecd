use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::auth::dto::{LoginRequest, LoginResponse};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Mock login: any non-empty credential pair is accepted, except the
/// configured sentinel email which always fails as a canned 401. No
/// credential verification happens anywhere.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.is_empty() {
        warn!("login with blank credentials");
        return Err((
            StatusCode::BAD_REQUEST,
            "Email and password required".into(),
        ));
    }

    if payload.email == state.config.login_reject_email {
        warn!(email = %payload.email, "login canned failure");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    info!(email = %payload.email, "user logged in");
    Ok(Json(LoginResponse { ok: true }))
}

/// Drop the in-memory profile; there is no session to invalidate.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.profile.write().expect("profile lock poisoned").clear();
    info!("user logged out");
    StatusCode::NO_CONTENT
}
