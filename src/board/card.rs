use crate::models::Activity;

use super::roster::{build_roster_row, RosterList};
use super::view::{CardId, IdAllocator};

#[derive(Debug, Clone)]
pub struct ActivityCard {
    id: CardId,
    name: String,
    description: String,
    schedule: String,
    max_participants: i64,
    spots_left: i64,
    roster: RosterList,
}

impl ActivityCard {
    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    pub fn max_participants(&self) -> i64 {
        self.max_participants
    }

    pub fn spots_left(&self) -> i64 {
        self.spots_left
    }

    pub fn roster(&self) -> &RosterList {
        &self.roster
    }

    pub(crate) fn roster_mut(&mut self) -> &mut RosterList {
        &mut self.roster
    }

    /// One spot taken. The counter never drops below zero, even when the
    /// server accepted more participants than the capacity.
    pub fn take_spot(&mut self) -> i64 {
        self.spots_left = self.spots_left.saturating_sub(1).max(0);
        self.spots_left
    }

    pub fn release_spot(&mut self) -> i64 {
        self.spots_left = self.spots_left.saturating_add(1);
        self.spots_left
    }
}

/// Builds the card for one activity. Never touches the network.
pub fn build_activity_card(ids: &mut IdAllocator, name: &str, activity: &Activity) -> ActivityCard {
    let id = ids.card();
    let rows = activity
        .participants
        .iter()
        .map(|email| build_roster_row(ids, name, email))
        .collect();

    ActivityCard {
        id,
        name: name.to_string(),
        description: activity.description.clone(),
        schedule: activity.schedule.clone(),
        max_participants: activity.max_participants,
        spots_left: activity
            .max_participants
            .saturating_sub(activity.participants.len() as i64),
        roster: RosterList::from_rows(rows),
    }
}
