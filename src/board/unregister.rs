use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::roster::UnregisterIntent;
use super::source::{ActivitySource, MutationResponse};
use super::status::StatusKind;
use super::view::ViewHandles;
use super::{Confirm, MutationOutcome, MutationReport, RosterPatch, GENERIC_FAILURE};

pub const UNREGISTER_UNREACHABLE: &str = "Failed to unregister. Please try again.";

pub fn confirmation_prompt(intent: &UnregisterIntent) -> String {
    format!("Unregister {} from {}?", intent.email, intent.activity)
}

pub struct UnregisterController<S> {
    source: Arc<S>,
    view: ViewHandles,
    confirm: Arc<dyn Confirm>,
    hide_after: Duration,
}

impl<S: ActivitySource> UnregisterController<S> {
    pub fn new(
        source: Arc<S>,
        view: ViewHandles,
        confirm: Arc<dyn Confirm>,
        hide_after: Duration,
    ) -> Self {
        Self {
            source,
            view,
            confirm,
            hide_after,
        }
    }

    /// Asks for confirmation, then unregisters. `None` when declined.
    pub async fn run(&self, intent: UnregisterIntent) -> Option<MutationReport> {
        if !self.confirm.confirm(&confirmation_prompt(&intent)) {
            debug!(activity = %intent.activity, email = %intent.email, "unregister declined");
            return None;
        }

        let outcome = match self.source.unregister(&intent.activity, &intent.email).await {
            Ok(MutationResponse::Accepted { message }) => {
                info!(activity = %intent.activity, email = %intent.email, "unregistered");
                MutationOutcome::Accepted { message }
            }
            Ok(MutationResponse::Rejected { status, detail }) => {
                warn!(activity = %intent.activity, status, detail = ?detail, "unregister rejected");
                MutationOutcome::Rejected {
                    detail: detail.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                }
            }
            Err(e) => {
                warn!(activity = %intent.activity, error = %e, "Error unregistering");
                MutationOutcome::Unreachable
            }
        };
        let patch = self.apply(&intent, &outcome);
        Some(MutationReport { outcome, patch })
    }

    /// Applies the outcome of an unregister: on success the row leaves its
    /// card (found through the row index) and the card gets a spot back.
    pub fn apply(&self, intent: &UnregisterIntent, outcome: &MutationOutcome) -> RosterPatch {
        match outcome {
            MutationOutcome::Accepted { message: text } => {
                let patch = {
                    let mut list = self.view.activities_list();
                    match list.remove_row(intent.row) {
                        Some(card) => RosterPatch::Removed {
                            card: card.id(),
                            placeholder_restored: card.roster().has_placeholder(),
                            spots_left: card.release_spot(),
                        },
                        None => {
                            debug!(email = %intent.email, "row no longer rendered, skipping patch");
                            RosterPatch::TargetMissing
                        }
                    }
                };
                self.view.message().show(StatusKind::Success, text.clone(), self.hide_after);
                patch
            }
            MutationOutcome::Rejected { detail } => {
                self.view.message().show(StatusKind::Error, detail.clone(), self.hide_after);
                RosterPatch::Unchanged
            }
            MutationOutcome::Unreachable => {
                self.view
                    .message()
                    .show(StatusKind::Error, UNREGISTER_UNREACHABLE, self.hide_after);
                RosterPatch::Unchanged
            }
        }
    }
}
