use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

/// A failed request: an HTTP status plus the machine-readable kind and
/// human-readable message the body carries.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: "NotFound",
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// The one place the core error taxonomy is mapped to HTTP statuses.
impl From<droptoken::Error> for ApiError {
    fn from(err: droptoken::Error) -> Self {
        use droptoken::Error::*;

        let status = match err {
            GameNotFound { .. } | PlayerNotFound { .. } | UnknownPlayer { .. } => {
                StatusCode::NOT_FOUND
            }
            OutOfTurn { .. } | InactivePlayer { .. } | TokensExhausted => StatusCode::CONFLICT,
            GameOver => StatusCode::GONE,
            InvalidDimension { .. }
            | InvalidColumn { .. }
            | InvalidRow { .. }
            | ColumnFull { .. }
            | InvalidName
            | InvalidPlayers { .. }
            | InvalidRange { .. } => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, kind = self.kind, message = %self.message, "request failed");
        (
            self.status,
            Json(serde_json::json!({"kind": self.kind, "message": self.message})),
        )
            .into_response()
    }
}
