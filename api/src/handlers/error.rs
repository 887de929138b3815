//! Mapping of domain and request errors onto HTTP responses

use std::collections::HashMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sf_core::errors::{AuthError, DomainError, TokenError};
use sf_shared::ErrorResponse;
use validator::{Validate, ValidationErrors};

/// Error returned by every handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid request data")]
    Validation(#[from] ValidationErrors),

    /// Body, path or query could not be parsed
    #[error("{0}")]
    BadInput(String),
}

impl ApiError {
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput(message.into())
    }

    /// Machine-readable code and client-facing message
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            Self::Validation(_) => ("validation_error", self.to_string()),
            Self::BadInput(message) => ("bad_request", message.clone()),
            Self::Domain(error) => match error {
                DomainError::NotFound { message } => ("not_found", message.clone()),
                DomainError::Conflict { message } => ("conflict", message.clone()),
                DomainError::BadRequest { message } => ("bad_request", message.clone()),
                DomainError::Validation { message } => ("validation_error", message.clone()),
                DomainError::Unauthorized => ("unauthorized", "Unauthorized".to_string()),
                DomainError::Auth(AuthError::WrongCredentials) => {
                    ("wrong_credentials", error.to_string())
                }
                DomainError::Auth(AuthError::EmailTaken) => ("email_taken", error.to_string()),
                DomainError::Auth(AuthError::InvalidPhoneFormat { .. }) => {
                    ("invalid_phone_format", error.to_string())
                }
                DomainError::Token(TokenError::MissingToken) => {
                    ("unauthorized", error.to_string())
                }
                DomainError::Token(TokenError::TokenGenerationFailed)
                | DomainError::Auth(AuthError::HashingFailed)
                | DomainError::Database { .. }
                | DomainError::Internal { .. } => (
                    "internal_error",
                    "An internal error occurred".to_string(),
                ),
                DomainError::Token(_) => ("invalid_token", error.to_string()),
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadInput(_) => StatusCode::BAD_REQUEST,
            Self::Domain(error) => match error {
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Conflict { .. } | DomainError::Auth(AuthError::EmailTaken) => {
                    StatusCode::CONFLICT
                }
                DomainError::BadRequest { .. }
                | DomainError::Validation { .. }
                | DomainError::Auth(AuthError::WrongCredentials)
                | DomainError::Auth(AuthError::InvalidPhoneFormat { .. }) => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::Token(TokenError::TokenGenerationFailed)
                | DomainError::Auth(AuthError::HashingFailed)
                | DomainError::Database { .. }
                | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                DomainError::Unauthorized | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let (code, message) = self.code_and_message();
        let mut body = ErrorResponse::new(code, message);
        if let Self::Validation(errors) = self {
            let mut details = HashMap::new();
            details.insert("validation_errors".to_string(), serde_json::json!(errors));
            body = body.with_details(details);
        }
        HttpResponse::build(status).json(body)
    }
}

/// Run `validator` rules on a request DTO
pub fn validate<T: Validate>(dto: &T) -> Result<(), ApiError> {
    dto.validate().map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (DomainError::not_found("Category not found"), StatusCode::NOT_FOUND),
            (DomainError::conflict("taken"), StatusCode::CONFLICT),
            (DomainError::bad_request("Wrong category id provided."), StatusCode::BAD_REQUEST),
            (AuthError::WrongCredentials.into(), StatusCode::BAD_REQUEST),
            (AuthError::EmailTaken.into(), StatusCode::CONFLICT),
            (TokenError::TokenExpired.into(), StatusCode::UNAUTHORIZED),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (DomainError::database("deadlock"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let (code, message) =
            ApiError::from(DomainError::database("password=hunter2")).code_and_message();

        assert_eq!(code, "internal_error");
        assert_eq!(message, "An internal error occurred");
    }

    #[test]
    fn test_not_found_message_is_passed_through() {
        let (code, message) =
            ApiError::from(DomainError::not_found("Product with 4 cannot be found."))
                .code_and_message();

        assert_eq!(code, "not_found");
        assert_eq!(message, "Product with 4 cannot be found.");
    }
}
