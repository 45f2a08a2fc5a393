use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::board::{ActivitySource, Board, RefreshOutcome, RowId, ViewHandles};
use crate::services::catalog_service::LocalActivitySource;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupPageForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub activity: String,
}

#[derive(Debug, Deserialize)]
pub struct RemovePageForm {
    pub activity: String,
    pub email: String,
}

pub async fn board_page_handler(State(state): State<AppState>) -> Response {
    match state.upstream {
        Some(api) => board_page(api).await,
        None => board_page(Arc::new(LocalActivitySource::new(state.pool))).await,
    }
}

/// Signup form post: the board is loaded, the form filled in and submitted
/// like a click on "Sign Up", then the reconciled page is sent back.
pub async fn signup_form_handler(
    State(state): State<AppState>,
    Form(form): Form<SignupPageForm>,
) -> Response {
    match state.upstream {
        Some(api) => signup_page(api, form).await,
        None => signup_page(Arc::new(LocalActivitySource::new(state.pool)), form).await,
    }
}

/// Removal form post. The browser already asked for confirmation before
/// submitting, so the board's confirm step accepts.
pub async fn unregister_form_handler(
    State(state): State<AppState>,
    Form(form): Form<RemovePageForm>,
) -> Response {
    match state.upstream {
        Some(api) => unregister_page(api, form).await,
        None => unregister_page(Arc::new(LocalActivitySource::new(state.pool)), form).await,
    }
}

async fn loaded_board<S: ActivitySource>(source: Arc<S>, confirmed: bool) -> Board<S> {
    let board = Board::new(source, Arc::new(move |_: &str| confirmed));
    if board.load().await == RefreshOutcome::Failed {
        warn!("Activities page rendered without catalog");
    }
    board
}

async fn board_page<S: ActivitySource>(source: Arc<S>) -> Response {
    let board = loaded_board(source, false).await;
    render(&board)
}

async fn signup_page<S: ActivitySource>(source: Arc<S>, form: SignupPageForm) -> Response {
    let board = loaded_board(source, false).await;
    {
        let mut draft = board.view().signup_form();
        draft.email = form.email;
        draft.activity = form.activity;
    }

    match board.submit_signup().await {
        Some(report) => {
            info!(outcome = ?report.outcome, patch = ?report.patch, "signup form submitted")
        }
        None => info!("signup form incomplete, nothing sent"),
    }
    render(&board)
}

async fn unregister_page<S: ActivitySource>(source: Arc<S>, form: RemovePageForm) -> Response {
    let board = loaded_board(source, true).await;

    match rendered_row(board.view(), &form.activity, &form.email) {
        Some(row) => {
            if let Some(report) = board.activate_remove(row).await {
                info!(outcome = ?report.outcome, patch = ?report.patch, "removal form submitted");
            }
        }
        None => info!(
            activity = %form.activity,
            email = %form.email,
            "participant not on the board, nothing sent"
        ),
    }
    render(&board)
}

fn rendered_row(view: &ViewHandles, activity: &str, email: &str) -> Option<RowId> {
    let list = view.activities_list();
    let card = list.card_by_name(activity)?;
    let row = card.roster().rows().find(|row| row.email() == email)?;
    Some(row.id())
}

fn render<S: ActivitySource>(board: &Board<S>) -> Response {
    match board.render_page() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("Activities page render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
