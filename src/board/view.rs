use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::card::ActivityCard;
use super::roster::RosterRow;
use super::status::StatusMessage;

pub const LOADING_NOTICE: &str = "Loading activities...";
pub const LOAD_FAILED_NOTICE: &str = "Failed to load activities. Please try again later.";
pub const DEFAULT_SELECT_LABEL: &str = "-- Select an activity --";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

/// Hands out card and row ids. Never reset, so ids from an earlier render can
/// not alias ids of a later one.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn card(&mut self) -> CardId {
        self.next += 1;
        CardId(self.next)
    }

    pub fn row(&mut self) -> RowId {
        self.next += 1;
        RowId(self.next)
    }
}

/// The activity card container plus the index used to find cards and rows
/// again after an async gap.
#[derive(Debug)]
pub struct ActivitiesList {
    cards: Vec<ActivityCard>,
    notice: Option<String>,
    by_name: HashMap<String, CardId>,
    row_owner: HashMap<RowId, CardId>,
    ids: IdAllocator,
}

impl Default for ActivitiesList {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            notice: Some(LOADING_NOTICE.to_string()),
            by_name: HashMap::new(),
            row_owner: HashMap::new(),
            ids: IdAllocator::default(),
        }
    }
}

impl ActivitiesList {
    pub fn clear(&mut self) {
        self.cards.clear();
        self.notice = None;
        self.by_name.clear();
        self.row_owner.clear();
    }

    /// Replaces whatever the container shows with a single notice.
    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.clear();
        self.notice = Some(text.into());
    }

    pub fn append_card(&mut self, card: ActivityCard) {
        let id = card.id();
        self.by_name.insert(card.name().to_string(), id);
        for row in card.roster().rows() {
            self.row_owner.insert(row.id(), id);
        }
        self.cards.push(card);
    }

    pub fn ids(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub fn cards(&self) -> &[ActivityCard] {
        &self.cards
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn card_id_for(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    pub fn card(&self, id: CardId) -> Option<&ActivityCard> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn card_by_name(&self, name: &str) -> Option<&ActivityCard> {
        self.card_id_for(name).and_then(|id| self.card(id))
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut ActivityCard> {
        self.cards.iter_mut().find(|c| c.id() == id)
    }

    /// The card a row currently belongs to.
    pub fn owner_of(&self, row: RowId) -> Option<CardId> {
        self.row_owner.get(&row).copied()
    }

    pub fn row(&self, row: RowId) -> Option<&RosterRow> {
        let owner = self.owner_of(row)?;
        self.card(owner)?.roster().row(row)
    }

    /// Appends a participant row to a card, dropping its placeholder first.
    /// Returns `None` when the card is no longer rendered.
    pub fn append_row(&mut self, card: CardId, row: RosterRow) -> Option<&mut ActivityCard> {
        let row_id = row.id();
        let target = self.cards.iter_mut().find(|c| c.id() == card)?;
        target.roster_mut().append(row);
        self.row_owner.insert(row_id, card);
        Some(target)
    }

    /// Removes a participant row from its owning card. Returns the owning card
    /// when the row was still rendered.
    pub fn remove_row(&mut self, row: RowId) -> Option<&mut ActivityCard> {
        let owner = self.row_owner.remove(&row)?;
        let target = self.cards.iter_mut().find(|c| c.id() == owner)?;
        target.roster_mut().remove(row)?;
        Some(target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selectable: bool,
}

/// The activity drop-down of the signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySelect {
    options: Vec<SelectOption>,
}

impl Default for ActivitySelect {
    fn default() -> Self {
        Self {
            options: vec![default_option()],
        }
    }
}

fn default_option() -> SelectOption {
    SelectOption {
        value: String::new(),
        label: DEFAULT_SELECT_LABEL.to_string(),
        selectable: false,
    }
}

impl ActivitySelect {
    pub fn reset(&mut self) {
        self.options = vec![default_option()];
    }

    pub fn push_activity(&mut self, name: &str) {
        self.options.push(SelectOption {
            value: name.to_string(),
            label: name.to_string(),
            selectable: true,
        });
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selectable_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.selectable)
            .map(|o| o.value.as_str())
            .collect()
    }
}

/// Field values of the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupIntent {
    pub activity: String,
    pub email: String,
}

impl SignupForm {
    /// Both fields are required; an incomplete form cannot be submitted.
    pub fn submission(&self) -> Option<SignupIntent> {
        let email = self.email.trim();
        let activity = self.activity.as_str();
        if email.is_empty() || activity.is_empty() {
            return None;
        }
        Some(SignupIntent {
            activity: activity.to_string(),
            email: email.to_string(),
        })
    }

    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }
}

/// Handles to the page elements the board populates. Cloning shares the same
/// elements.
#[derive(Clone, Default)]
pub struct ViewHandles {
    activities_list: Arc<Mutex<ActivitiesList>>,
    activity_select: Arc<Mutex<ActivitySelect>>,
    signup_form: Arc<Mutex<SignupForm>>,
    message: StatusMessage,
}

impl ViewHandles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activities_list(&self) -> MutexGuard<'_, ActivitiesList> {
        lock(&self.activities_list)
    }

    pub fn activity_select(&self) -> MutexGuard<'_, ActivitySelect> {
        lock(&self.activity_select)
    }

    pub fn signup_form(&self) -> MutexGuard<'_, SignupForm> {
        lock(&self.signup_form)
    }

    pub fn message(&self) -> &StatusMessage {
        &self.message
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
