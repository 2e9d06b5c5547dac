//! GitHub GraphQL implementation of [`UserSearch`]

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GithubConfig;
use crate::pagination::SearchUsersOptions;
use crate::search::{GraphQlErrorEntry, UpstreamError, UserSearch};
use crate::types::SearchResult;

/// User search document. Aliases map GitHub fields onto [`crate::types::UserNode`].
const SEARCH_USERS_QUERY: &str = r#"
query SearchUsers($query: String!, $first: Int, $after: String, $last: Int, $before: String) {
  search(type: USER, query: $query, first: $first, after: $after, last: $last, before: $before) {
    totalCount: userCount
    edges {
      node {
        ... on User {
          username: login
          name
          avatarUrl
          followers {
            count: totalCount
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
      hasPreviousPage
      startCursor
    }
  }
}
"#;

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: &'a SearchUsersOptions,
}

#[derive(Deserialize, Default)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<SearchData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Deserialize, Default)]
struct SearchData {
    #[serde(default)]
    search: Option<SearchResult>,
}

/// Client for `POST /graphql` on the GitHub API.
///
/// Makes exactly one attempt per search; retry policy is left to callers.
#[derive(Debug, Clone)]
pub struct GithubSearchClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GithubSearchClient {
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be built (e.g. TLS backend
    /// initialisation).
    pub fn new(config: &GithubConfig) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        })
    }
}

/// Turn a raw GraphQL HTTP answer into a search result or a typed failure.
fn interpret_response(status: u16, body: &[u8]) -> Result<SearchResult, UpstreamError> {
    let response: GraphQlResponse = serde_json::from_slice(body).map_err(|e| {
        UpstreamError::Unknown(format!("undecodable response (HTTP {status}): {e}"))
    })?;

    let errors = response.errors.unwrap_or_default();
    if !errors.is_empty() || !(200..300).contains(&status) {
        return Err(UpstreamError::Client {
            status: Some(status),
            errors,
        });
    }

    response
        .data
        .and_then(|data| data.search)
        .ok_or_else(|| UpstreamError::Unknown("response has no data.search".to_string()))
}

#[async_trait]
impl UserSearch for GithubSearchClient {
    async fn search(&self, options: &SearchUsersOptions) -> Result<SearchResult, UpstreamError> {
        tracing::debug!(
            query = %options.query,
            pagination = ?options.pagination,
            "Searching GitHub users"
        );

        let mut request = self.client.post(&self.endpoint).json(&GraphQlRequest {
            query: SEARCH_USERS_QUERY,
            variables: options,
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Unknown(format!("request failed: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Unknown(format!("reading body failed: {e}")))?;

        interpret_response(status, &body)
    }
}
