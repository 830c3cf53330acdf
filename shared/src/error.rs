use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    WrongStatus(String),
    #[error("{0}")]
    AlreadyStarted(String),
    #[error("{0}")]
    OverlappingBooking(String),
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    RequestValidationError(#[from] garde::Report),
    #[error("{0}")]
    UnauthenticatedError(String),
    #[error("transaction could not be executed")]
    TransactionError(#[source] sqlx::Error),
    #[error("an error occurred while running a database operation")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    /// Failures of the persistence layer rather than business-rule
    /// violations. These pass through the lifecycle untouched.
    pub fn is_repository_error(&self) -> bool {
        matches!(
            self,
            AppError::TransactionError(_)
                | AppError::SpecificOperationError(_)
                | AppError::NoRowsAffectedError(_)
                | AppError::ConversionEntityError(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AppError::ValidationError(_) | AppError::RequestValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UnauthenticatedError(_) => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::WrongStatus(_) | AppError::OverlappingBooking(_) => StatusCode::CONFLICT,
            AppError::AlreadyStarted(_) => StatusCode::UNPROCESSABLE_ENTITY,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::ConversionEntityError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status_code, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_business_errors_to_client_statuses() {
        let cases = [
            (AppError::EntityNotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::ForbiddenOperation("x".into()), StatusCode::FORBIDDEN),
            (AppError::WrongStatus("x".into()), StatusCode::CONFLICT),
            (AppError::OverlappingBooking("x".into()), StatusCode::CONFLICT),
            (
                AppError::AlreadyStarted("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::UnauthenticatedError("x".into()),
                StatusCode::UNAUTHORIZED,
            ),
        ];
        for (error, expected) in cases {
            assert!(!error.is_repository_error());
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn repository_errors_become_internal_server_errors() {
        let error = AppError::SpecificOperationError(sqlx::Error::RowNotFound);
        assert!(error.is_repository_error());
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
