//! Mapping of upstream failures onto HTTP outcomes

use axum::http::StatusCode;

use crate::search::UpstreamError;

/// Message returned when upstream rejects a pagination cursor
pub const INVALID_CURSOR_MESSAGE: &str = "Invalid pagination cursor";

/// HTTP outcome for an upstream failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: StatusCode,
    /// Caller-facing message, only set when it is safe and useful to show
    pub message: Option<&'static str>,
}

impl Classification {
    pub fn message_or_reason(&self) -> &'static str {
        self.message
            .or_else(|| self.status.canonical_reason())
            .unwrap_or("Unknown error")
    }
}

/// Classify an upstream failure. Checked in order:
///
/// 1. a client error listing `INVALID_CURSOR_ARGUMENTS` is the caller's fault: 400
/// 2. any other client error is treated as upstream unavailability: 503
/// 3. everything else is an internal fault: 500
pub fn classify(error: &UpstreamError) -> Classification {
    match error {
        UpstreamError::Client { errors, .. } if errors.iter().any(|e| e.is_invalid_cursor()) => {
            Classification {
                status: StatusCode::BAD_REQUEST,
                message: Some(INVALID_CURSOR_MESSAGE),
            }
        }
        UpstreamError::Client { .. } => Classification {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: None,
        },
        UpstreamError::Unknown(_) => Classification {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        },
    }
}
