use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::auth::errors::AuthError;

pub mod login;
pub mod refresh;
pub mod register;
pub mod validate;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    /// Field-level request validation failures, keyed by field name.
    Validation(BTreeMap<String, String>),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponseBody::new_validation_error(errors)),
            )
                .into_response(),
            other => {
                let (status, message) = match other {
                    ApiError::InternalServerError(msg) => {
                        // Full detail stays server-side.
                        tracing::error!(error = %msg, "Internal server error");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "Internal server error".to_string(),
                        )
                    }
                    ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
                    ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                    ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
                    ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
                    ApiError::Validation(_) => unreachable!(),
                };

                (status, Json(ApiResponseBody::new_error(status, message))).into_response()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PrincipalNotFound(_) => ApiError::NotFound(err.to_string()),
            AuthError::PrincipalAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthError::AuthenticationFailed
            | AuthError::InvalidRefreshToken
            | AuthError::TokenValidationFailed(_) => ApiError::Unauthorized(err.to_string()),
            AuthError::Password(_) | AuthError::Token(_) | AuthError::Store(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

impl ApiResponseBody<ApiValidationData> {
    pub fn new_validation_error(errors: BTreeMap<String, String>) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            data: ApiValidationData {
                message: "Validation failed".to_string(),
                errors,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Error body for field-level validation failures: message plus a
/// field-to-message mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiValidationData {
    pub message: String,
    pub errors: BTreeMap<String, String>,
}
