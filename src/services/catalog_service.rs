use std::collections::HashMap;

use axum::http::StatusCode;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::board::{ActivitySource, MutationResponse, SourceError};
use crate::database::{activities_repo, activity_participants_repo};
use crate::models::{Activity, Catalog};

#[derive(Debug, Error)]
pub enum CatalogCommandError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student already signed up for this activity")]
    AlreadySignedUp,
    #[error("Activity full")]
    ActivityFull,
    #[error("Student is not signed up for this activity")]
    NotSignedUp,
    #[error("Email is required")]
    EmailRequired,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogCommandError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogCommandError::ActivityNotFound => StatusCode::NOT_FOUND,
            CatalogCommandError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// The text sent to clients as `detail`. Database errors stay server-side.
    pub fn detail(&self) -> String {
        match self {
            CatalogCommandError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub async fn load_catalog(pool: &SqlitePool) -> sqlx::Result<Catalog> {
    let activities = activities_repo::list_activities(pool).await?;
    let participants = activity_participants_repo::list_participants(pool).await?;

    let mut rosters: HashMap<String, Vec<String>> = HashMap::new();
    for p in participants {
        rosters.entry(p.activity_name).or_default().push(p.email);
    }

    Ok(activities
        .into_iter()
        .map(|row| {
            let participants = rosters.remove(&row.name).unwrap_or_default();
            (
                row.name,
                Activity {
                    description: row.description,
                    schedule: row.schedule,
                    max_participants: row.max_participants,
                    participants,
                },
            )
        })
        .collect())
}

pub async fn signup(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> Result<String, CatalogCommandError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CatalogCommandError::EmailRequired);
    }
    if activities_repo::load_activity_by_name(pool, activity_name)
        .await?
        .is_none()
    {
        return Err(CatalogCommandError::ActivityNotFound);
    }
    if activity_participants_repo::is_participant(pool, activity_name, email).await? {
        return Err(CatalogCommandError::AlreadySignedUp);
    }

    let inserted = activity_participants_repo::insert_participant_if_open(pool, activity_name, email)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent signup for the same email.
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                CatalogCommandError::AlreadySignedUp
            } else {
                CatalogCommandError::Database(e)
            }
        })?;
    if inserted == 0 {
        return Err(CatalogCommandError::ActivityFull);
    }

    Ok(format!("Signed up {} for {}", email, activity_name))
}

pub async fn unregister(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> Result<String, CatalogCommandError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CatalogCommandError::EmailRequired);
    }
    if activities_repo::load_activity_by_name(pool, activity_name)
        .await?
        .is_none()
    {
        return Err(CatalogCommandError::ActivityNotFound);
    }

    let removed = activity_participants_repo::delete_participant(pool, activity_name, email).await?;
    if removed == 0 {
        return Err(CatalogCommandError::NotSignedUp);
    }

    Ok(format!("Unregistered {} from {}", email, activity_name))
}

/// Board data source that reads and writes the database directly. Used to
/// render the page server-side.
#[derive(Clone)]
pub struct LocalActivitySource {
    pool: SqlitePool,
}

impl LocalActivitySource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn into_response(result: Result<String, CatalogCommandError>) -> MutationResponse {
    match result {
        Ok(message) => MutationResponse::Accepted { message },
        Err(e) => MutationResponse::Rejected {
            status: e.status().as_u16(),
            detail: Some(e.detail()),
        },
    }
}

impl ActivitySource for LocalActivitySource {
    async fn fetch_catalog(&self) -> Result<Catalog, SourceError> {
        load_catalog(&self.pool)
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationResponse, SourceError> {
        Ok(into_response(signup(&self.pool, activity, email).await))
    }

    async fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<MutationResponse, SourceError> {
        Ok(into_response(unregister(&self.pool, activity, email).await))
    }
}
