pub mod routes;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    response::Redirect,
    routing::{get, get_service, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::board::SourceError;
use crate::services::roster_api_service::HttpActivitySource;
use crate::settings::Settings;

use routes::{activities, activity, board};

/// Shared handler state. The board page goes through `upstream` when an
/// activities API is configured and straight to `pool` otherwise.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub upstream: Option<Arc<HttpActivitySource>>,
}

impl AppState {
    pub fn local(pool: SqlitePool) -> Self {
        Self {
            pool,
            upstream: None,
        }
    }

    pub fn from_settings(pool: SqlitePool, settings: &Settings) -> Result<Self, SourceError> {
        Ok(Self {
            pool,
            upstream: HttpActivitySource::from_settings(settings)?.map(Arc::new),
        })
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

pub fn router(pool: SqlitePool) -> Router {
    app(AppState::local(pool))
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(board::board_page_handler))
        .route("/index.html", get(|| async { Redirect::to("/") }))
        .route("/signup", post(board::signup_form_handler))
        .route("/unregister", post(board::unregister_form_handler))
        .route("/activities", get(activities::list_activities_handler))
        .route(
            "/activities/:activity_name/signup",
            post(activity::signup_handler),
        )
        .route(
            "/activities/:activity_name/unregister",
            post(activity::unregister_handler),
        )
        .nest_service(
            "/static",
            get_service(ServeDir::new("static")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
