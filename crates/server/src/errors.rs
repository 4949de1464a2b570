use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by every handler, rendered as `{"error": ..., "message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
    /// `code()` of the service or auth error behind this response; none for
    /// request extraction failures.
    pub code: Option<u16>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self { status, error, message: message.into(), code: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    /// Logs the detail and hides it from the client.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", "Internal server error.")
    }

    fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = self.status.as_u16(), code = ?self.code, error = self.error, message = %self.message, "request rejected");
        }
        let body = serde_json::json!({"error": self.error, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let code = e.code();
        let api = match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "not_found", msg),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "conflict", msg),
            e @ ServiceError::CarUnavailable { .. } => Self::new(StatusCode::CONFLICT, "car_unavailable", e.to_string()),
            ServiceError::InvalidState(msg) => Self::new(StatusCode::CONFLICT, "invalid_state", msg),
            other @ ServiceError::Db(_) => Self::internal(format_args!("[{code}] {other}")),
        };
        api.with_code(code)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let code = e.code();
        let api = match e {
            AuthError::InvalidInput(msg) => Self::bad_request(msg),
            e @ AuthError::Conflict => Self::new(StatusCode::CONFLICT, "conflict", e.to_string()),
            e @ AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, "unauthorized", e.to_string()),
            other @ (AuthError::HashError(_) | AuthError::Repository(_)) => {
                Self::internal(format_args!("[{code}] {other}"))
            }
        };
        api.with_code(code)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        Self::bad_request(r.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        Self::bad_request(r.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses_and_codes() {
        let cases = [
            (ServiceError::not_found("Car"), StatusCode::NOT_FOUND, 2002),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT, 2003),
            (ServiceError::CarUnavailable { car_id: 1 }, StatusCode::CONFLICT, 2004),
            (ServiceError::InvalidState("cancelled".into()), StatusCode::CONFLICT, 2005),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, 2100),
        ];
        for (err, status, code) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.code, Some(code));
        }
    }

    #[test]
    fn auth_errors_map_to_statuses_and_codes() {
        let invalid = ApiError::from(AuthError::InvalidInput("Name is required.".into()));
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.code, Some(1001));
        assert_eq!(ApiError::from(AuthError::Conflict).status, StatusCode::CONFLICT);
        let unauthorized = ApiError::from(AuthError::Unauthorized);
        assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unauthorized.code, Some(1004));
        assert_eq!(unauthorized.message, "Invalid email or password.");
        assert_eq!(ApiError::from(AuthError::HashError("salt".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_errors_hide_detail() {
        let e = ApiError::from(ServiceError::Db("connection refused".into()));
        assert_eq!(e.message, "Internal server error.");
        assert_eq!(e.error, "internal");
    }

    #[test]
    fn extraction_failures_carry_no_code() {
        assert_eq!(ApiError::bad_request("bad json").code, None);
    }
}
