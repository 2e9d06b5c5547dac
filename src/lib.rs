//! # github-user-search
//!
//! Cursor-paginated "search users by programming language" endpoint backed
//! by the GitHub GraphQL API.
//!
//! ## Features
//!
//! - **Request translation** - `langs`/`limit`/`before`/`after` into Relay
//!   `first/after` or `last/before`
//! - **Response normalization** - stable user records and prev/next links
//!   from partial upstream data
//! - **Error classification** - upstream failures mapped onto 400/503/500
//! - **Pluggable upstream** - any [`UserSearch`] implementation can back the endpoint
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use github_user_search::{router, AppState, GithubSearchClient, ServiceConfig};
//!
//! # fn example() -> github_user_search::Result<()> {
//! let config = ServiceConfig::load()?;
//! let client = GithubSearchClient::new(&config.github)?;
//! let app = router(AppState::new(Arc::new(client), config.public_path.as_str()));
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod config;
pub mod github;
pub mod handler;
pub mod pagination;
pub mod response;
pub mod search;
pub mod telemetry;
pub mod types;

pub use classify::{classify, Classification};
pub use crate::config::{GithubConfig, ServiceConfig};
pub use github::GithubSearchClient;
pub use handler::{router, search_users, ApiError, AppState};
pub use pagination::{
    prepare_search_options, PageInfo, PageLinks, Pagination, SearchUsersOptions,
};
pub use response::{prepare_response, LinkContext, SearchUsersResponse};
pub use search::{GraphQlErrorEntry, UpstreamError, UserSearch};
pub use types::{NormalizedUser, SearchResult, SearchUsersParams, SearchUsersQuery};

use thiserror::Error;

/// Service errors
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Cannot specify both 'before' and 'after'")]
    ConflictingCursors,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// Result type for service operations
pub type Result<T> = std::result::Result<T, SearchError>;
