use std::future::Future;

use thiserror::Error;

use crate::models::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// How the server answered a signup or unregister request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResponse {
    Accepted { message: String },
    Rejected { status: u16, detail: Option<String> },
}

/// The data source behind the board: one catalog read and two mutations.
pub trait ActivitySource: Send + Sync {
    fn fetch_catalog(&self) -> impl Future<Output = Result<Catalog, SourceError>> + Send;

    fn signup(
        &self,
        activity: &str,
        email: &str,
    ) -> impl Future<Output = Result<MutationResponse, SourceError>> + Send;

    fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> impl Future<Output = Result<MutationResponse, SourceError>> + Send;
}
