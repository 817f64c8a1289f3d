use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::errors::AuthError;
use crate::auth::models::TokenString;
use crate::auth::models::TokenValidation;
use crate::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn validate(
    State(state): State<AppState>,
    Json(body): Json<ValidateRequest>,
) -> Result<ApiSuccess<ValidationResponseData>, ApiError> {
    tracing::info!("Validating token");

    let token = body.try_into_token()?;

    match state.auth_service.validate(token).await {
        Ok(validation) => Ok(ApiSuccess::new(
            StatusCode::OK,
            ValidationResponseData::from(validation),
        )),
        // A failed validation is a structured negative result, not a hard
        // failure: third-party callers get `valid: false` and nothing else.
        Err(AuthError::TokenValidationFailed(_)) => Ok(ApiSuccess::new(
            StatusCode::OK,
            ValidationResponseData::invalid(),
        )),
        Err(other) => Err(ApiError::from(other)),
    }
}

/// HTTP request body for token validation (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateRequest {
    token: String,
}

impl ValidateRequest {
    fn try_into_token(self) -> Result<TokenString, ApiError> {
        TokenString::new(self.token).map_err(|e| {
            let mut errors = BTreeMap::new();
            errors.insert("token".to_string(), e.to_string());
            ApiError::Validation(errors)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponseData {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ValidationResponseData {
    fn invalid() -> Self {
        Self {
            valid: false,
            email: None,
            role: None,
            expires_at: None,
        }
    }
}

impl From<TokenValidation> for ValidationResponseData {
    fn from(validation: TokenValidation) -> Self {
        Self {
            valid: validation.valid,
            email: Some(validation.email),
            role: Some(validation.role),
            expires_at: Some(validation.expires_at),
        }
    }
}
