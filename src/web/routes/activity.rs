use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::services::catalog_service::{self, CatalogCommandError};

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

type CommandResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
    State(pool): State<SqlitePool>,
) -> CommandResult {
    let email = query.email.unwrap_or_default();
    match catalog_service::signup(&pool, &activity_name, &email).await {
        Ok(message) => {
            info!(activity = %activity_name, email = %email, "signup accepted");
            Ok(Json(json!({ "message": message })))
        }
        Err(e) => Err(command_failed("signup", &activity_name, e)),
    }
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
    State(pool): State<SqlitePool>,
) -> CommandResult {
    let email = query.email.unwrap_or_default();
    match catalog_service::unregister(&pool, &activity_name, &email).await {
        Ok(message) => {
            info!(activity = %activity_name, email = %email, "unregister accepted");
            Ok(Json(json!({ "message": message })))
        }
        Err(e) => Err(command_failed("unregister", &activity_name, e)),
    }
}

fn command_failed(
    command: &str,
    activity_name: &str,
    e: CatalogCommandError,
) -> (StatusCode, Json<Value>) {
    let status = e.status();
    if status.is_server_error() {
        warn!(command, activity = %activity_name, error = %e, "command failed");
    } else {
        info!(command, activity = %activity_name, detail = %e, "command rejected");
    }
    (status, Json(json!({ "detail": e.detail() })))
}
