use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::models::Catalog;
use crate::services::catalog_service;

pub async fn list_activities_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Catalog>, (StatusCode, Json<Value>)> {
    catalog_service::load_catalog(&pool)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("Activities load failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Internal server error" })),
            )
        })
}
