#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;

use roster::board::{ActivitySource, MutationResponse, SourceError};
use roster::database::{self, schema};
use roster::models::{Activity, Catalog};
use sqlx::SqlitePool;

/// Scripted data source: answers come from queues filled by the test.
#[derive(Default)]
pub struct FakeSource {
    catalog: Mutex<Option<Result<Catalog, SourceError>>>,
    signups: Mutex<VecDeque<Result<MutationResponse, SourceError>>>,
    unregisters: Mutex<VecDeque<Result<MutationResponse, SourceError>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_catalog(catalog: Catalog) -> Self {
        let source = FakeSource::default();
        source.set_catalog(Ok(catalog));
        source
    }

    pub fn set_catalog(&self, answer: Result<Catalog, SourceError>) {
        *self.catalog.lock().unwrap() = Some(answer);
    }

    pub fn push_signup(&self, answer: Result<MutationResponse, SourceError>) {
        self.signups.lock().unwrap().push_back(answer);
    }

    pub fn push_unregister(&self, answer: Result<MutationResponse, SourceError>) {
        self.unregisters.lock().unwrap().push_back(answer);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ActivitySource for FakeSource {
    async fn fetch_catalog(&self) -> Result<Catalog, SourceError> {
        self.calls.lock().unwrap().push("fetch".to_string());
        self.catalog
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(SourceError::Transport("no catalog scripted".to_string())))
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationResponse, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("signup {} {}", activity, email));
        self.signups
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Transport("no signup scripted".to_string())))
    }

    async fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<MutationResponse, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("unregister {} {}", activity, email));
        self.unregisters
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Transport("no unregister scripted".to_string())))
    }
}

pub fn accepted(message: &str) -> Result<MutationResponse, SourceError> {
    Ok(MutationResponse::Accepted {
        message: message.to_string(),
    })
}

pub fn rejected(status: u16, detail: Option<&str>) -> Result<MutationResponse, SourceError> {
    Ok(MutationResponse::Rejected {
        status,
        detail: detail.map(str::to_string),
    })
}

pub fn catalog(entries: &[(&str, i64, &[&str])]) -> Catalog {
    entries
        .iter()
        .map(|(name, max, participants)| {
            (
                name.to_string(),
                Activity {
                    description: format!("About {}", name),
                    schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
                    max_participants: *max,
                    participants: participants.iter().map(|p| p.to_string()).collect(),
                },
            )
        })
        .collect()
}

/// Fresh in-memory database with the schema and the seeded school catalog.
pub async fn seeded_pool() -> SqlitePool {
    let pool = database::connect("sqlite::memory:").await.expect("pool");
    schema::ensure_schema(&pool).await.expect("schema");
    schema::seed_default_catalog(&pool).await.expect("seed");
    pool
}

/// Serves the full router on an ephemeral port.
pub async fn spawn_server(pool: SqlitePool) -> SocketAddr {
    spawn_router(roster::web::router(pool)).await
}

pub async fn spawn_router(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}
