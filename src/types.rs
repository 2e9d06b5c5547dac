//! Common request and record types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::pagination::PageInfo;

/// Treat an explicit `null` like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw `GET /users` query parameters, before validation
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SearchUsersQuery {
    pub langs: Option<String>,
    pub limit: Option<i64>,
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Validated search parameters.
///
/// `langs` is non-empty, `limit` is positive, and at most one of
/// `before`/`after` is set to a non-empty cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUsersParams {
    pub langs: String,
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[cfg(test)]
impl SearchUsersParams {
    pub fn new(langs: impl Into<String>, limit: u32) -> Self {
        Self {
            langs: langs.into(),
            limit,
            before: None,
            after: None,
        }
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }
}

/// `search` field of the upstream GraphQL response.
///
/// Every field is optional: the upstream payload is not trusted to be
/// complete. `totalCount` keeps whatever number upstream sent.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub total_count: Option<Number>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<UserEdge>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_info: PageInfo,
}

/// Edge wrapping one user node
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct UserEdge {
    #[serde(default)]
    pub node: Option<UserNode>,
}

/// User node as returned upstream, with GitHub fields aliased onto our names
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub followers: Option<Followers>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Followers {
    #[serde(default)]
    pub count: Option<i64>,
}

/// User record exposed by the service.
///
/// String fields default to `null`, `followersCount` defaults to `0`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub followers_count: i64,
}

impl From<&UserNode> for NormalizedUser {
    fn from(node: &UserNode) -> Self {
        Self {
            username: node.username.clone(),
            name: node.name.clone(),
            avatar_url: node.avatar_url.clone(),
            followers_count: node
                .followers
                .as_ref()
                .and_then(|f| f.count)
                .unwrap_or(0),
        }
    }
}
