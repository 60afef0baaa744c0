use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::error::ErrorResponse;

pub const MISSING_ID: &str = "Missing required parameter: id";
pub const INVALID_ID: &str = "Invalid song id format";

/// Every way a `/song` request can fail. Each variant renders as the uniform
/// `{code, message}` body; the wrapped cause is only ever logged.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
    #[error("failed to build upstream url: {0}")]
    UpstreamUrl(#[from] url::ParseError),
    #[error("failed to request music service: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),
    #[error("failed to read response body: {0}")]
    UpstreamReadError(#[source] reqwest::Error),
    #[error("failed to parse response: {0}")]
    UpstreamDecodeError(#[from] serde_json::Error),
    #[error("music service returned code {0}")]
    UpstreamRejected(i64),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) | RelayError::UpstreamRejected(_) => StatusCode::BAD_REQUEST,
            RelayError::UpstreamUrl(_)
            | RelayError::UpstreamUnreachable(_)
            | RelayError::UpstreamReadError(_)
            | RelayError::UpstreamDecodeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_response(&self) -> ErrorResponse {
        match self {
            RelayError::InvalidRequest(message) => ErrorResponse::new(400, *message),
            RelayError::UpstreamUrl(_) | RelayError::UpstreamUnreachable(_) => {
                ErrorResponse::new(500, "Failed to request music service")
            }
            RelayError::UpstreamReadError(_) => {
                ErrorResponse::new(500, "Failed to read response from music service")
            }
            RelayError::UpstreamDecodeError(_) => {
                ErrorResponse::new(500, "Failed to parse response from music service")
            }
            RelayError::UpstreamRejected(code) => ErrorResponse::new(*code, "Music service returned error"),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.error_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_map_to_bad_request() {
        let err = RelayError::InvalidRequest(MISSING_ID);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_response(), ErrorResponse::new(400, MISSING_ID));
    }

    #[test]
    fn rejection_carries_upstream_code() {
        let err = RelayError::UpstreamRejected(404);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_response(), ErrorResponse::new(404, "Music service returned error"));
    }

    #[test]
    fn decode_failure_hides_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = RelayError::from(cause);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.error_response(),
            ErrorResponse::new(500, "Failed to parse response from music service")
        );
    }

    #[test]
    fn bad_upstream_url_counts_as_unreachable() {
        let err = RelayError::from(url::Url::parse("not a url").unwrap_err());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_response().message, "Failed to request music service");
    }
}
