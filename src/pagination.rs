//! Relay-style cursor pagination, translated from REST query parameters

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{SearchUsersParams, SearchUsersQuery};
use crate::SearchError;

/// Page size used when the caller does not send `limit`
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page GitHub connections accept for `first`/`last`
pub const MAX_LIMIT: u32 = 100;

/// Upstream page information.
///
/// Kept as the raw object so it is forwarded to callers exactly as
/// received, `null` cursors and unknown keys included.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct PageInfo(pub Map<String, Value>);

impl PageInfo {
    fn flag(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn cursor(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn has_next(&self) -> bool {
        self.flag("hasNextPage")
    }

    pub fn has_previous(&self) -> bool {
        self.flag("hasPreviousPage")
    }

    pub fn end_cursor(&self) -> Option<&str> {
        self.cursor("endCursor")
    }

    pub fn start_cursor(&self) -> Option<&str> {
        self.cursor("startCursor")
    }
}

/// Pagination arguments for the upstream `search` connection.
///
/// Exactly one direction is ever populated.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Pagination {
    /// `first` items, optionally `after` a cursor. Also the first-page mode.
    Forward {
        first: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        after: Option<String>,
    },
    /// `last` items `before` a cursor
    Backward { last: u32, before: String },
}

impl Pagination {
    pub fn limit(&self) -> u32 {
        match self {
            Pagination::Forward { first, .. } => *first,
            Pagination::Backward { last, .. } => *last,
        }
    }

    pub fn direction(&self) -> &'static str {
        match self {
            Pagination::Forward { .. } => "forward",
            Pagination::Backward { .. } => "backward",
        }
    }
}

/// Upstream search request: the GraphQL variables of the user search query
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchUsersOptions {
    pub query: String,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Links to the neighbouring pages
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

fn non_empty(cursor: &Option<String>) -> Option<&str> {
    cursor.as_deref().filter(|c| !c.is_empty())
}

/// Build the upstream search request for already validated parameters.
///
/// `langs` is passed through untouched, so `java,c++` becomes
/// `language:java,c++`. A non-empty `before` wins over `after`.
pub fn prepare_search_options(params: &SearchUsersParams) -> SearchUsersOptions {
    let query = format!("language:{}", params.langs);

    let pagination = if let Some(before) = non_empty(&params.before) {
        Pagination::Backward {
            last: params.limit,
            before: before.to_string(),
        }
    } else {
        Pagination::Forward {
            first: params.limit,
            after: non_empty(&params.after).map(str::to_string),
        }
    };

    SearchUsersOptions { query, pagination }
}

impl SearchUsersQuery {
    /// Validate raw query parameters.
    ///
    /// Shape errors are reported before the cursor conflict, so a request
    /// with an empty `langs` and both cursors is a validation error.
    pub fn validate(self) -> crate::Result<SearchUsersParams> {
        let langs = match self.langs {
            Some(langs) if !langs.is_empty() => langs,
            _ => {
                return Err(SearchError::InvalidParameter(
                    "'langs' must be a non-empty string".to_string(),
                ))
            }
        };

        let limit = match self.limit {
            None => DEFAULT_LIMIT,
            Some(limit) if limit <= 0 => {
                return Err(SearchError::InvalidParameter(
                    "'limit' must be a positive integer".to_string(),
                ))
            }
            Some(limit) if limit > i64::from(MAX_LIMIT) => {
                return Err(SearchError::InvalidParameter(format!(
                    "'limit' cannot exceed {MAX_LIMIT}"
                )))
            }
            Some(limit) => limit as u32,
        };

        for (name, cursor) in [("before", &self.before), ("after", &self.after)] {
            if matches!(cursor, Some(c) if c.is_empty()) {
                return Err(SearchError::InvalidParameter(format!(
                    "'{name}' must not be empty"
                )));
            }
        }

        if self.before.is_some() && self.after.is_some() {
            return Err(SearchError::ConflictingCursors);
        }

        Ok(SearchUsersParams {
            langs,
            limit,
            before: self.before,
            after: self.after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(langs: &str) -> SearchUsersQuery {
        SearchUsersQuery {
            langs: Some(langs.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_backward_when_before_is_set() {
        let opts = prepare_search_options(&SearchUsersParams::new("c", 123).before("cursor"));
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({ "query": "language:c", "last": 123, "before": "cursor" })
        );
        assert_eq!(opts.pagination.direction(), "backward");
    }

    #[test]
    fn test_forward_when_after_is_set() {
        let opts = prepare_search_options(&SearchUsersParams::new("c", 123).after("cursor"));
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({ "query": "language:c", "first": 123, "after": "cursor" })
        );
    }

    #[test]
    fn test_first_page_has_no_cursor() {
        let opts = prepare_search_options(&SearchUsersParams::new("c", 123));
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({ "query": "language:c", "first": 123 })
        );
        assert_eq!(opts.pagination.limit(), 123);
    }

    #[test]
    fn test_empty_cursors_are_ignored() {
        let opts = prepare_search_options(&SearchUsersParams::new("c", 5).before("").after(""));
        assert_eq!(
            opts.pagination,
            Pagination::Forward {
                first: 5,
                after: None
            }
        );
    }

    #[test]
    fn test_langs_pass_through_verbatim() {
        let opts = prepare_search_options(&SearchUsersParams::new("java,c++", 20));
        assert_eq!(opts.query, "language:java,c++");
    }

    #[test]
    fn test_validate_defaults_limit() {
        let params = query("rust").validate().unwrap();
        assert_eq!(params, SearchUsersParams::new("rust", DEFAULT_LIMIT));
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        let cases = [
            SearchUsersQuery::default(),
            query(""),
            SearchUsersQuery {
                limit: Some(-1),
                ..query("c")
            },
            SearchUsersQuery {
                limit: Some(0),
                ..query("c")
            },
            SearchUsersQuery {
                limit: Some(101),
                ..query("c")
            },
            SearchUsersQuery {
                before: Some(String::new()),
                ..query("c")
            },
            SearchUsersQuery {
                after: Some(String::new()),
                ..query("c")
            },
        ];

        for case in cases {
            let err = case.clone().validate().unwrap_err();
            assert!(
                matches!(err, SearchError::InvalidParameter(_)),
                "{case:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_both_cursors() {
        let err = SearchUsersQuery {
            before: Some("a".to_string()),
            after: Some("b".to_string()),
            ..query("c")
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, SearchError::ConflictingCursors));
    }

    #[test]
    fn test_page_info_round_trips_verbatim() {
        let raw = json!({ "hasNextPage": true, "endCursor": "abc", "extra": 1 });
        let info: PageInfo = serde_json::from_value(raw.clone()).unwrap();
        assert!(info.has_next());
        assert!(!info.has_previous());
        assert_eq!(info.end_cursor(), Some("abc"));
        assert_eq!(serde_json::to_value(&info).unwrap(), raw);
    }

    #[test]
    fn test_page_info_keeps_null_cursors() {
        let raw = json!({
            "hasNextPage": false,
            "endCursor": null,
            "hasPreviousPage": false,
            "startCursor": null
        });
        let info: PageInfo = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(info.end_cursor(), None);
        assert_eq!(info.start_cursor(), None);
        assert_eq!(serde_json::to_value(&info).unwrap(), raw);
    }
}
