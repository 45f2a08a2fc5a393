use super::initials::initials_from_email;
use super::source::ActivitySource;
use super::unregister::{confirmation_prompt, UnregisterController};
use super::view::{IdAllocator, RowId};
use super::MutationReport;

pub const EMPTY_ROSTER_TEXT: &str = "No participants yet — be the first!";

/// What activating a row's removal control asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisterIntent {
    pub activity: String,
    pub email: String,
    pub row: RowId,
}

#[derive(Debug, Clone)]
pub struct RemoveControl {
    intent: UnregisterIntent,
}

impl RemoveControl {
    pub fn intent(&self) -> &UnregisterIntent {
        &self.intent
    }

    pub fn label(&self) -> String {
        format!("Unregister {}", self.intent.email)
    }

    /// The question asked before the removal is sent.
    pub fn prompt(&self) -> String {
        confirmation_prompt(&self.intent)
    }

    /// Runs the unregister flow for this row. `None` when the user declined
    /// the confirmation.
    pub async fn activate<S: ActivitySource>(
        &self,
        controller: &UnregisterController<S>,
    ) -> Option<MutationReport> {
        controller.run(self.intent.clone()).await
    }
}

#[derive(Debug, Clone)]
pub struct RosterRow {
    id: RowId,
    email: String,
    initials: String,
    remove: RemoveControl,
}

impl RosterRow {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn initials(&self) -> &str {
        &self.initials
    }

    pub fn remove_control(&self) -> &RemoveControl {
        &self.remove
    }
}

pub fn build_roster_row(ids: &mut IdAllocator, activity: &str, email: &str) -> RosterRow {
    let id = ids.row();
    RosterRow {
        id,
        email: email.to_string(),
        initials: initials_from_email(email),
        remove: RemoveControl {
            intent: UnregisterIntent {
                activity: activity.to_string(),
                email: email.to_string(),
                row: id,
            },
        },
    }
}

#[derive(Debug, Clone)]
pub enum RosterItem {
    Placeholder,
    Participant(RosterRow),
}

/// A card's roster. Holds either the placeholder alone or at least one
/// participant row, never both.
#[derive(Debug, Clone)]
pub struct RosterList {
    items: Vec<RosterItem>,
}

impl RosterList {
    pub fn from_rows(rows: Vec<RosterRow>) -> Self {
        if rows.is_empty() {
            return Self {
                items: vec![RosterItem::Placeholder],
            };
        }
        Self {
            items: rows.into_iter().map(RosterItem::Participant).collect(),
        }
    }

    pub fn items(&self) -> &[RosterItem] {
        &self.items
    }

    pub fn has_placeholder(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, RosterItem::Placeholder))
    }

    pub fn rows(&self) -> impl Iterator<Item = &RosterRow> {
        self.items.iter().filter_map(|item| match item {
            RosterItem::Participant(row) => Some(row),
            RosterItem::Placeholder => None,
        })
    }

    pub fn row(&self, id: RowId) -> Option<&RosterRow> {
        self.rows().find(|r| r.id() == id)
    }

    pub fn participant_count(&self) -> usize {
        self.rows().count()
    }

    pub fn emails(&self) -> Vec<&str> {
        self.rows().map(|r| r.email()).collect()
    }

    pub fn append(&mut self, row: RosterRow) {
        self.items
            .retain(|item| !matches!(item, RosterItem::Placeholder));
        self.items.push(RosterItem::Participant(row));
    }

    /// Removes a participant row, restoring the placeholder when it was the
    /// last one.
    pub fn remove(&mut self, id: RowId) -> Option<RosterRow> {
        let index = self
            .items
            .iter()
            .position(|item| matches!(item, RosterItem::Participant(r) if r.id() == id))?;
        let removed = match self.items.remove(index) {
            RosterItem::Participant(row) => row,
            RosterItem::Placeholder => return None,
        };
        if self.items.is_empty() {
            self.items.push(RosterItem::Placeholder);
        }
        Some(removed)
    }
}
