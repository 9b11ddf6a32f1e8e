//! Mapping of domain errors to HTTP responses.
//!
//! Every failure leaves the API as `{"message": "..."}` with the status code
//! chosen by [`AppError::status_code`].

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

use contas_db::{AccountError, PartyError};
use contas_shared::AppError;

/// Message returned when an account ID does not exist.
pub const ACCOUNT_NOT_FOUND: &str = "Account not found";
/// Message returned when a party ID does not exist.
pub const PARTY_NOT_FOUND: &str = "Party not found";
/// Message returned when account creation lost a concurrent race twice.
pub const RETRY_LATER: &str = "Too many concurrent changes, please retry";

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let app = match err {
            AccountError::AccountNotFound(_) => AppError::NotFound(ACCOUNT_NOT_FOUND.to_string()),
            AccountError::PartyNotFound(_) => AppError::NotFound(PARTY_NOT_FOUND.to_string()),
            AccountError::MonthlyLimitExceeded(limit) => AppError::BusinessRule(limit.to_string()),
            AccountError::Conflict => AppError::Conflict(RETRY_LATER.to_string()),
            AccountError::Database(db) => AppError::Database(db.to_string()),
        };
        Self(app)
    }
}

impl From<PartyError> for ApiError {
    fn from(err: PartyError) -> Self {
        let app = match err {
            PartyError::NotFound(_) => AppError::NotFound(PARTY_NOT_FOUND.to_string()),
            PartyError::Database(db) => AppError::Database(db.to_string()),
        };
        Self(app)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self(AppError::Validation(validation_message(&errors)))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        }

        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(json!({ "message": self.0.public_message() }))).into_response()
    }
}

/// Flattens field errors into one message, sorted for stable output.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contas_core::account::MonthlyLimitExceeded;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use sea_orm::DbErr;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(AccountError::AccountNotFound(1).into(), StatusCode::NOT_FOUND, ACCOUNT_NOT_FOUND)]
    #[case(AccountError::PartyNotFound(1).into(), StatusCode::NOT_FOUND, PARTY_NOT_FOUND)]
    #[case(PartyError::NotFound(1).into(), StatusCode::NOT_FOUND, PARTY_NOT_FOUND)]
    #[case(
        AccountError::MonthlyLimitExceeded(MonthlyLimitExceeded { year: 2024, month: 1, limit: 5 }).into(),
        StatusCode::UNPROCESSABLE_ENTITY,
        "Monthly limit of 5 accounts reached for 2024-01"
    )]
    #[case(AccountError::Conflict.into(), StatusCode::CONFLICT, RETRY_LATER)]
    #[case(
        AccountError::Database(DbErr::Custom("disk on fire".into())).into(),
        StatusCode::INTERNAL_SERVER_ERROR,
        "An error occurred"
    )]
    #[tokio::test]
    async fn test_error_response(
        #[case] error: ApiError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let response = error.into_response();

        assert_eq!(response.status(), status);
        assert_eq!(body_json(response).await, json!({ "message": message }));
    }
}
