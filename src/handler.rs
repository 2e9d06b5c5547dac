//! `GET /users` endpoint
//!
//! Validates the query, translates it into an upstream search, and turns the
//! outcome into either a normalized page of users or a classified error.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::classify::{classify, Classification};
use crate::pagination::prepare_search_options;
use crate::response::{prepare_response, LinkContext, SearchUsersResponse};
use crate::search::{UpstreamError, UserSearch};
use crate::types::SearchUsersQuery;
use crate::SearchError;

/// Shared state of the endpoint
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn UserSearch>,
    pub public_path: Arc<str>,
}

impl AppState {
    pub fn new(search: Arc<dyn UserSearch>, public_path: impl Into<Arc<str>>) -> Self {
        Self {
            search,
            public_path: public_path.into(),
        }
    }
}

/// Failures surfaced to HTTP callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed query parameters
    #[error("{0}")]
    Validation(String),

    /// Mutually exclusive pagination directives
    #[error("{0}")]
    Conflict(String),

    /// Upstream search failure, already classified
    #[error("{}", .0.message_or_reason())]
    Upstream(Classification),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(class) => class.status,
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidParameter(msg) => ApiError::Validation(msg),
            err @ SearchError::ConflictingCursors => ApiError::Conflict(err.to_string()),
            other => {
                tracing::error!(error = %other, "Unexpected error while handling search");
                ApiError::Upstream(classify(&UpstreamError::Unknown(other.to_string())))
            }
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        let class = classify(&err);
        match &err {
            UpstreamError::Client { status, errors } => tracing::warn!(
                upstream_status = ?status,
                upstream_errors = ?errors,
                classified_as = %class.status,
                "Upstream rejected user search"
            ),
            UpstreamError::Unknown(reason) => {
                tracing::error!(%reason, "User search failed")
            }
        }
        ApiError::Upstream(class)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    timestamp: String,
    status: u16,
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Run one search for already parsed query parameters.
///
/// The upstream is called at most once, and never when the parameters are
/// invalid or conflicting.
pub async fn search_users(
    search: &dyn UserSearch,
    public_path: &str,
    query: SearchUsersQuery,
) -> Result<SearchUsersResponse, ApiError> {
    let params = query.validate()?;
    let options = prepare_search_options(&params);
    tracing::debug!(
        query = %options.query,
        direction = options.pagination.direction(),
        limit = options.pagination.limit(),
        "Translated user search"
    );

    let result = search.search(&options).await?;

    tracing::debug!(
        total_count = ?result.total_count,
        edges = result.edges.len(),
        "User search succeeded"
    );
    Ok(prepare_response(result, &LinkContext::new(public_path, &params)))
}

/// Axum handler for `GET /users`
pub async fn filter_users(
    State(state): State<AppState>,
    query: Result<Query<SearchUsersQuery>, QueryRejection>,
) -> Result<Json<SearchUsersResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    search_users(state.search.as_ref(), &state.public_path, query)
        .await
        .map(Json)
}

/// Router exposing the search endpoint on `state.public_path`
pub fn router(state: AppState) -> Router {
    let path = state.public_path.to_string();

    Router::new()
        .route(&path, get(filter_users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
