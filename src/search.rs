//! Upstream user search capability

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::SearchUsersOptions;
use crate::types::SearchResult;

/// GraphQL error `type` reported for malformed `before`/`after` cursors
pub const INVALID_CURSOR_ARGUMENTS: &str = "INVALID_CURSOR_ARGUMENTS";

/// One entry of a GraphQL `errors` array
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphQlErrorEntry {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl GraphQlErrorEntry {
    pub fn of_type(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            message: None,
        }
    }

    pub fn is_invalid_cursor(&self) -> bool {
        self.kind.as_deref() == Some(INVALID_CURSOR_ARGUMENTS)
    }
}

/// Failure of an upstream search call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Upstream answered with a GraphQL error payload
    #[error("GraphQL client error (status {status:?}, {} error(s))", errors.len())]
    Client {
        status: Option<u16>,
        errors: Vec<GraphQlErrorEntry>,
    },

    /// Transport failure or a response that could not be understood
    #[error("Upstream failure: {0}")]
    Unknown(String),
}

/// User search backend.
///
/// Injected into the HTTP layer so tests and alternative backends can stand
/// in for the GitHub API.
#[async_trait]
pub trait UserSearch: Send + Sync {
    /// Run one search. Implementations must not retry.
    async fn search(&self, options: &SearchUsersOptions) -> Result<SearchResult, UpstreamError>;
}
