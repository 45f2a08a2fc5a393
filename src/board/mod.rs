//! Client-side roster board: renders the activity catalog into a typed view
//! tree and keeps it in step with signup/unregister outcomes without a full
//! re-fetch.

pub mod card;
pub mod initials;
pub mod markup;
pub mod renderer;
pub mod roster;
pub mod signup;
pub mod source;
pub mod status;
pub mod unregister;
pub mod view;

use std::sync::Arc;

use tracing::debug;

pub use card::{build_activity_card, ActivityCard};
pub use initials::initials_from_email;
pub use renderer::{render_catalog, CatalogRenderer, RefreshOutcome};
pub use roster::{build_roster_row, RemoveControl, RosterItem, RosterList, RosterRow, UnregisterIntent};
pub use signup::SignupController;
pub use source::{ActivitySource, MutationResponse, SourceError};
pub use status::{StatusDelays, StatusKind, StatusMessage, StatusSnapshot};
pub use unregister::UnregisterController;
pub use view::{ActivitiesList, ActivitySelect, CardId, RowId, SignupForm, SignupIntent, ViewHandles};

pub const GENERIC_FAILURE: &str = "An error occurred";

/// Stands in for the browser's confirmation dialog.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What a mutation request came back with, as far as the page is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Accepted { message: String },
    Rejected { detail: String },
    Unreachable,
}

/// The change a controller made to the rendered cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterPatch {
    Appended {
        card: CardId,
        row: RowId,
        spots_left: i64,
    },
    Removed {
        card: CardId,
        spots_left: i64,
        placeholder_restored: bool,
    },
    /// The mutation succeeded but its card or row is not rendered (anymore).
    TargetMissing,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    pub outcome: MutationOutcome,
    pub patch: RosterPatch,
}

/// The page: view handles plus the renderer and controllers wired to them.
pub struct Board<S> {
    view: ViewHandles,
    renderer: CatalogRenderer<S>,
    signup: SignupController<S>,
    unregister: UnregisterController<S>,
}

impl<S: ActivitySource> Board<S> {
    pub fn new(source: Arc<S>, confirm: Arc<dyn Confirm>) -> Self {
        Self::with_delays(source, confirm, StatusDelays::default())
    }

    pub fn with_delays(source: Arc<S>, confirm: Arc<dyn Confirm>, delays: StatusDelays) -> Self {
        let view = ViewHandles::new();
        Self {
            renderer: CatalogRenderer::new(Arc::clone(&source), view.clone()),
            signup: SignupController::new(Arc::clone(&source), view.clone(), delays.signup),
            unregister: UnregisterController::new(source, view.clone(), confirm, delays.unregister),
            view,
        }
    }

    pub fn view(&self) -> &ViewHandles {
        &self.view
    }

    pub fn signup_controller(&self) -> &SignupController<S> {
        &self.signup
    }

    pub fn unregister_controller(&self) -> &UnregisterController<S> {
        &self.unregister
    }

    pub async fn load(&self) -> RefreshOutcome {
        self.renderer.refresh().await
    }

    pub async fn submit_signup(&self) -> Option<MutationReport> {
        self.signup.submit().await
    }

    /// Dispatches a click on a row's removal control. `None` when the row is
    /// gone or the user declined.
    pub async fn activate_remove(&self, row: RowId) -> Option<MutationReport> {
        let control = self
            .view
            .activities_list()
            .row(row)
            .map(|r| r.remove_control().clone());
        let Some(control) = control else {
            debug!(?row, "removal control no longer rendered");
            return None;
        };
        control.activate(&self.unregister).await
    }

    pub fn render_page(&self) -> askama::Result<String> {
        markup::render_page(&self.view)
    }
}
