use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::meals::dto::{
    BulkSaveRequest, ImportRequest, PlanCell, PlanResponse, PlanRow, PutMealRequest,
    UpsertMealResponse,
};
use crate::meals::planner::{local_today, PlanGrid};
use crate::meals::types::{Meal, MealPatch, MealType, MAX_SERVINGS, MIN_SERVINGS};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/meals", get(list_meals))
        .route("/meals/:id", get(get_meal))
        .route("/plan", get(get_plan))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(upsert_meal))
        .route("/meals/import", post(import_meals))
        .route("/meals/bulk", post(bulk_save))
        .route(
            "/meals/:id",
            axum::routing::patch(patch_meal).delete(delete_meal),
        )
}

/// Initial load for the planning UI: the whole collection, dates as plain
/// `YYYY-MM-DD` strings.
#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Meal>> {
    let store = state.meals.read().expect("meal store lock poisoned");
    debug!(count = store.len(), "listing meals");
    let mut meals: Vec<Meal> = store.iter().cloned().collect();
    meals.sort_by(|a, b| (a.date, a.meal_type.as_str(), &a.id).cmp(&(b.date, b.meal_type.as_str(), &b.id)));
    Json(meals)
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Meal>, (StatusCode, String)> {
    let store = state.meals.read().expect("meal store lock poisoned");
    match store.get(&id) {
        Some(meal) => Ok(Json(meal.clone())),
        None => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
    }
}

/// Insert or replace a full meal record. A blank id gets a server-assigned
/// one and a 201 with a Location header.
#[instrument(skip(state, payload))]
pub async fn upsert_meal(
    State(state): State<AppState>,
    Json(payload): Json<PutMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<UpsertMealResponse>), (StatusCode, String)> {
    validate_servings(payload.servings)?;

    let id = if payload.id.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        payload.id.clone()
    };

    let mut store = state.meals.write().expect("meal store lock poisoned");
    let created = store.get(&id).is_none();
    store.upsert(payload.into_meal(id.clone()));

    let mut headers = HeaderMap::new();
    let status = if created {
        headers.insert(
            axum::http::header::LOCATION,
            format!("/api/v1/meals/{id}")
                .parse()
                .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "bad location".to_string()))?,
        );
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    info!(%id, created, "meal upserted");
    Ok((status, headers, Json(UpsertMealResponse { id })))
}

/// Replace the whole collection from an upstream-shaped payload.
#[instrument(skip(state, payload))]
pub async fn import_meals(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut meals = Vec::new();
    for upstream in payload.into_meals() {
        let meal = upstream
            .into_meal()
            .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
        meals.push(meal);
    }
    let count = meals.len();
    state
        .meals
        .write()
        .expect("meal store lock poisoned")
        .set_meals(meals);
    info!(count, "meal collection replaced");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, patch))]
pub async fn patch_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MealPatch>,
) -> Result<StatusCode, (StatusCode, String)> {
    if let Some(servings) = patch.servings {
        validate_servings(servings)?;
    }
    let mut store = state.meals.write().expect("meal store lock poisoned");
    if store.patch(&id, patch) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Meal not found".into()))
    }
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = state.meals.write().expect("meal store lock poisoned");
    if store.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Meal not found".into()))
    }
}

/// Bulk save of the active plan. The triples are logged, counted as
/// meal-logging activity for the duck, and otherwise dropped: the client
/// never consumes the response.
#[instrument(skip(state, payload))]
pub async fn bulk_save(
    State(state): State<AppState>,
    Json(payload): Json<BulkSaveRequest>,
) -> StatusCode {
    for item in &payload.items {
        debug!(id = %item.id, date = %item.date, meal_type = %item.meal_type, "bulk item");
    }
    let selected = state
        .meals
        .read()
        .expect("meal store lock poisoned")
        .selected_count();
    info!(items = payload.items.len(), selected, "bulk save received");
    state
        .profile
        .write()
        .expect("profile lock poisoned")
        .record_meal_activity(time::OffsetDateTime::now_utc());
    StatusCode::NO_CONTENT
}

/// The rendered planning grid: day columns plus a dense 3 x N cell matrix.
#[instrument(skip(state))]
pub async fn get_plan(State(state): State<AppState>) -> Json<PlanResponse> {
    let store = state.meals.read().expect("meal store lock poisoned");
    let snapshot = store.snapshot();
    let grid = PlanGrid::build(&snapshot, local_today());

    let rows = MealType::ALL
        .iter()
        .map(|&meal_type| PlanRow {
            meal_type,
            cells: grid
                .columns
                .iter()
                .map(|col| {
                    grid.cell(col.key, meal_type).map(|meal| PlanCell {
                        id: meal.id.clone(),
                        name: meal.name.clone(),
                        selected: meal.selected,
                        servings: meal.servings,
                        macros: meal.macros,
                    })
                })
                .collect(),
        })
        .collect();

    Json(PlanResponse { columns: grid.columns.clone(), rows })
}

fn validate_servings(servings: u32) -> Result<(), (StatusCode, String)> {
    if !(MIN_SERVINGS..=MAX_SERVINGS).contains(&servings) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("servings must be between {MIN_SERVINGS} and {MAX_SERVINGS}"),
        ));
    }
    Ok(())
}
