use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures of the storage layer shared by both binaries.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("login {0:?} is already taken")]
    DuplicateLogin(String),

    #[error("catalog already holds type {0:?}")]
    DuplicateType(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fatal outcomes of a loader run. None of them leaves a partial catalog behind.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("no table captioned {0:?} on the page")]
    TableNotFound(String),

    #[error("malformed table row {row}: {reason}")]
    RowParse { row: usize, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors a request handler turns into a bare HTTP status.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("identity cookie required")]
    Unauthenticated,

    #[error("already identified")]
    AlreadyIdentified,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServiceError::Unauthenticated => (StatusCode::UNAUTHORIZED, "401: Unauthorized".to_string()),
            ServiceError::AlreadyIdentified => (StatusCode::FORBIDDEN, "403: Forbidden".to_string()),
            ServiceError::Store(ref e) => {
                tracing::error!(error = %e, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "500: Internal Server Error".to_string())
            }
            ServiceError::Internal(ref msg) => {
                tracing::error!(error = %msg, "internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "500: Internal Server Error".to_string())
            }
        };
        (status, message).into_response()
    }
}

/// Recoverable form outcomes, shown to the visitor on the re-rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("All fields are necessary, please, fill them")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("User exists with current login, come up with another name")]
    DuplicateLogin,

    #[error("User does not exist with this password")]
    AuthFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_identity_rules() {
        assert_eq!(
            ServiceError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::AlreadyIdentified.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::Internal("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn form_messages_are_user_facing() {
        assert_eq!(FormError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(
            FormError::AuthFailure.to_string(),
            "User does not exist with this password"
        );
    }
}
