//! Normalization of upstream search results into the public response shape

use serde::{Deserialize, Serialize};
use serde_json::Number;
use url::form_urlencoded;

use crate::pagination::{PageInfo, PageLinks};
use crate::types::{NormalizedUser, SearchResult, SearchUsersParams, UserNode};

/// Body of a successful `GET /users`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersResponse {
    pub users: Vec<NormalizedUser>,
    pub total_count: Option<Number>,
    pub page_info: PageInfo,
    pub links: PageLinks,
}

/// What the link builder needs to know about the current request
#[derive(Debug, Clone)]
pub struct LinkContext<'a> {
    pub path: &'a str,
    pub langs: &'a str,
    pub limit: u32,
}

impl<'a> LinkContext<'a> {
    pub fn new(path: &'a str, params: &'a SearchUsersParams) -> Self {
        Self {
            path,
            langs: &params.langs,
            limit: params.limit,
        }
    }

    fn link(&self, cursor_key: &str, cursor: Option<&str>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("langs", self.langs)
            .append_pair("limit", &self.limit.to_string());
        if let Some(cursor) = cursor {
            query.append_pair(cursor_key, cursor);
        }
        format!("{}?{}", self.path, query.finish())
    }

    /// Links for the pages around `page_info`; a key is set only when its
    /// upstream flag is true.
    pub fn page_links(&self, page_info: &PageInfo) -> PageLinks {
        PageLinks {
            prev: page_info
                .has_previous()
                .then(|| self.link("before", page_info.start_cursor())),
            next: page_info
                .has_next()
                .then(|| self.link("after", page_info.end_cursor())),
        }
    }
}

/// Map the upstream user list, keeping edge order.
pub fn prepare_users(result: &SearchResult) -> Vec<NormalizedUser> {
    result
        .edges
        .iter()
        .map(|edge| match &edge.node {
            Some(node) => NormalizedUser::from(node),
            None => NormalizedUser::from(&UserNode::default()),
        })
        .collect()
}

/// Build the public response. Never fails: missing upstream fields fall
/// back to their defaults.
pub fn prepare_response(result: SearchResult, ctx: &LinkContext<'_>) -> SearchUsersResponse {
    let users = prepare_users(&result);
    let links = ctx.page_links(&result.page_info);

    SearchUsersResponse {
        users,
        total_count: result.total_count,
        page_info: result.page_info,
        links,
    }
}
