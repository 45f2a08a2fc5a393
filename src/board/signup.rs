use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::roster::build_roster_row;
use super::source::{ActivitySource, MutationResponse};
use super::status::StatusKind;
use super::view::{SignupIntent, ViewHandles};
use super::{MutationOutcome, MutationReport, RosterPatch, GENERIC_FAILURE};

pub const SIGNUP_UNREACHABLE: &str = "Failed to sign up. Please try again.";

pub struct SignupController<S> {
    source: Arc<S>,
    view: ViewHandles,
    hide_after: Duration,
}

impl<S: ActivitySource> SignupController<S> {
    pub fn new(source: Arc<S>, view: ViewHandles, hide_after: Duration) -> Self {
        Self {
            source,
            view,
            hide_after,
        }
    }

    /// Submits the signup form. `None` when the form is incomplete, in which
    /// case no request is made.
    pub async fn submit(&self) -> Option<MutationReport> {
        let intent = self.view.signup_form().submission();
        let Some(intent) = intent else {
            debug!("signup form incomplete, nothing submitted");
            return None;
        };
        Some(self.signup(intent).await)
    }

    pub async fn signup(&self, intent: SignupIntent) -> MutationReport {
        let outcome = match self.source.signup(&intent.activity, &intent.email).await {
            Ok(MutationResponse::Accepted { message }) => {
                info!(activity = %intent.activity, email = %intent.email, "signed up");
                MutationOutcome::Accepted { message }
            }
            Ok(MutationResponse::Rejected { status, detail }) => {
                warn!(activity = %intent.activity, status, detail = ?detail, "signup rejected");
                MutationOutcome::Rejected {
                    detail: detail.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                }
            }
            Err(e) => {
                warn!(activity = %intent.activity, error = %e, "Error signing up");
                MutationOutcome::Unreachable
            }
        };
        let patch = self.apply(&intent, &outcome);
        MutationReport { outcome, patch }
    }

    /// Applies the outcome of a signup to the page: status message, form
    /// reset and the card patch (append row, take a spot).
    pub fn apply(&self, intent: &SignupIntent, outcome: &MutationOutcome) -> RosterPatch {
        match outcome {
            MutationOutcome::Accepted { message: text } => {
                self.view.message().show(StatusKind::Success, text.clone(), self.hide_after);
                self.view.signup_form().reset();

                let mut list = self.view.activities_list();
                let Some(card_id) = list.card_id_for(&intent.activity) else {
                    debug!(activity = %intent.activity, "no card rendered for activity, skipping patch");
                    return RosterPatch::TargetMissing;
                };
                let row = build_roster_row(list.ids(), &intent.activity, &intent.email);
                let row_id = row.id();
                match list.append_row(card_id, row) {
                    Some(card) => RosterPatch::Appended {
                        card: card_id,
                        row: row_id,
                        spots_left: card.take_spot(),
                    },
                    None => RosterPatch::TargetMissing,
                }
            }
            MutationOutcome::Rejected { detail } => {
                self.view.message().show(StatusKind::Error, detail.clone(), self.hide_after);
                RosterPatch::Unchanged
            }
            MutationOutcome::Unreachable => {
                self.view.message().show(StatusKind::Error, SIGNUP_UNREACHABLE, self.hide_after);
                RosterPatch::Unchanged
            }
        }
    }
}
