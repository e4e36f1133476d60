//! API errors and their JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tagging_core::StoreError;

use crate::envelope::Envelope;

/// Everything a handler can fail with.
///
/// Every variant renders as `{"status": "error", "message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more required fields were absent or empty.
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    /// The query string could not be decoded (repeated key, bad encoding).
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),

    /// The body could not be read (too large, connection dropped).
    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::MalformedBody(_) | Self::MalformedQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::BodyRejected { status, .. } => *status,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Store(ref e) = self {
            tracing::error!(error = %e, "Tag store operation failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Rejected request");
        }
        (status, Json(Envelope::<()>::error(self.to_string()))).into_response()
    }
}
