pub mod activities;
pub mod activity_participants;
pub mod catalog;

pub use activities::ActivitiesRow;
pub use activity_participants::ActivityParticipantsRow;
pub use catalog::{Activity, Catalog};
