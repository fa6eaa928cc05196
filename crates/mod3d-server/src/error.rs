use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use mod3d_lifecycle::LifecycleError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Lifecycle(LifecycleError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Lifecycle(LifecycleError::Unauthorized { .. }) => StatusCode::FORBIDDEN,
            Self::Lifecycle(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Lifecycle(LifecycleError::NotFound(_)) => json!({ "error": "Model not found" }),
            Self::Lifecycle(LifecycleError::Unauthorized { .. }) => {
                json!({ "error": "Not authorized" })
            }
            Self::Lifecycle(LifecycleError::Persistence(cause)) => {
                tracing::error!(error = %cause, "request failed in metadata store");
                json!({ "error": "Persistence failure", "details": cause.to_string() })
            }
            other if status.is_server_error() => {
                tracing::error!(error = %other, "request failed");
                json!({ "error": other.to_string() })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mod3d_gate::Action;
    use mod3d_store::MetadataError;
    use mod3d_types::{RecordId, UserId};

    #[test]
    fn lifecycle_errors_map_to_statuses() {
        let id = RecordId::generate();
        assert_eq!(
            ServerError::from(LifecycleError::NotFound(id)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::from(LifecycleError::Unauthorized {
                id,
                identity: UserId::new("u2").unwrap(),
                action: Action::Delete,
                reason: "not owner".into(),
            })
            .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServerError::from(LifecycleError::Persistence(MetadataError::WriteFailed(
                "down".into()
            )))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn auth_errors_are_unauthorized() {
        assert_eq!(ServerError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServerError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }
}
