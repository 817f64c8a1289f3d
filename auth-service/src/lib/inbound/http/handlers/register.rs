use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::EmailAddress;
use crate::auth::models::Password;
use crate::auth::models::RegisterCommand;
use crate::auth::models::Username;
use crate::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<String>, ApiError> {
    tracing::info!(username = %body.username, "Registering new user");

    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|()| ApiSuccess::new(StatusCode::OK, "User registered successfully".to_string()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

impl RegisterRequest {
    /// Validate every field, collecting failures into a field-to-message
    /// map rather than stopping at the first one.
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        let mut errors = BTreeMap::new();

        let username = Username::new(self.username)
            .map_err(|e| errors.insert("username".to_string(), e.to_string()))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.insert("email".to_string(), e.to_string()))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| errors.insert("password".to_string(), e.to_string()))
            .ok();

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) => {
                Ok(RegisterCommand::new(username, email, password))
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}
