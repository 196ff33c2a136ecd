use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::inventory::types::PantryItem;
use crate::state::AppState;

pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(list_inventory))
        .route("/inventory/:id", put(upsert_inventory_item))
        .route("/shopping-list", get(list_shopping))
        .route("/shopping-list/:id/collect", post(collect_item))
}

#[derive(Debug, Deserialize)]
pub struct InventoryUpsert {
    #[serde(default)]
    pub quantity: f64,
}

#[instrument(skip(state))]
pub async fn list_inventory(State(state): State<AppState>) -> Json<Vec<PantryItem>> {
    let store = state.inventory.read().expect("inventory lock poisoned");
    Json(store.inventory())
}

/// Set the owned amount of an item; zero or less drops it from the
/// inventory (204), anything else echoes the new amount back.
#[instrument(skip(state))]
pub async fn upsert_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<InventoryUpsert>,
) -> Result<axum::response::Response, (StatusCode, String)> {
    let mut store = state.inventory.write().expect("inventory lock poisoned");
    if !store.set_amount(id, payload.quantity) {
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    }
    if payload.quantity > 0.0 {
        Ok(Json(serde_json::json!({ "id": id, "amount": payload.quantity })).into_response())
    } else {
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}

#[instrument(skip(state))]
pub async fn list_shopping(State(state): State<AppState>) -> Json<Vec<PantryItem>> {
    let store = state.inventory.read().expect("inventory lock poisoned");
    Json(store.shopping_list().to_vec())
}

/// Tick an item off the shopping list; its amount lands in the inventory.
#[instrument(skip(state))]
pub async fn collect_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<PantryItem>, (StatusCode, String)> {
    let mut store = state.inventory.write().expect("inventory lock poisoned");
    match store.collect(id) {
        Some(item) => {
            info!(id, name = %item.name, "shopping item collected");
            Ok(Json(item))
        }
        None => Err((StatusCode::NOT_FOUND, "Item not found".into())),
    }
}

#[cfg(test)]
mod inventory_handler_tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::app::build_app;
    use crate::state::AppState;

    #[tokio::test]
    async fn upsert_to_zero_removes_and_returns_no_content() {
        let app = build_app(AppState::demo());
        let res = app
            .clone()
            .oneshot(
                Request::put("/api/v1/inventory/2")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"quantity":0}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app
            .oneshot(Request::get("/api/v1/inventory").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn collect_merges_into_inventory() {
        let app = build_app(AppState::demo());
        let res = app
            .oneshot(
                Request::post("/api/v1/shopping-list/1/collect")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["name"], "Apples");
        assert_eq!(json["amount"], 10.0);
    }

    #[tokio::test]
    async fn collect_unknown_item_is_not_found() {
        let app = build_app(AppState::demo());
        let res = app
            .oneshot(
                Request::post("/api/v1/shopping-list/99/collect")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
