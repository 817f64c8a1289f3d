use std::collections::BTreeMap;

use auth_core::TokenPair;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::EmailAddress;
use crate::auth::models::LoginCommand;
use crate::auth::models::Password;
use crate::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    tracing::info!(email = %body.email, "Received login request");

    state
        .auth_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, TokenResponseData::from(pair)))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let mut errors = BTreeMap::new();

        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.insert("email".to_string(), e.to_string()))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| errors.insert("password".to_string(), e.to_string()))
            .ok();

        match (email, password) {
            (Some(email), Some(password)) => Ok(LoginCommand::new(email, password)),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Token pair response shared by the login and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl From<TokenPair> for TokenResponseData {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
        }
    }
}
