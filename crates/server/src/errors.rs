use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use profilescout::ScoutError;
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A required request field was absent.
    MissingArgs(&'static str),
    /// Errors originating from `profilescout`.
    Scout(ScoutError),
}

/// Conversion from `ScoutError` to `AppError`.
impl From<ScoutError> for AppError {
    fn from(err: ScoutError) -> Self {
        match err {
            ScoutError::MissingArgs(field) => AppError::MissingArgs(field),
            other => AppError::Scout(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::MissingArgs(field) => {
                warn!(field, "Rejected request with missing field");
                (StatusCode::BAD_REQUEST, "Missing args".to_string())
            }
            AppError::Scout(err) => {
                // Log the original error for debugging purposes
                error!("ScoutError: {:?}", err);
                match err {
                    ScoutError::MissingProvider(_) | ScoutError::ReqwestClientBuild(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    _ => (
                        StatusCode::BAD_GATEWAY,
                        "An upstream provider request failed.".to_string(),
                    ),
                }
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
