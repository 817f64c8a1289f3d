use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::login::TokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::TokenString;
use crate::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    tracing::info!("Received token refresh request");

    let token = body.try_into_token()?;

    state
        .auth_service
        .refresh(token)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, TokenResponseData::from(pair)))
}

/// HTTP request body for token refresh (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    refresh_token: String,
}

impl RefreshRequest {
    fn try_into_token(self) -> Result<TokenString, ApiError> {
        TokenString::new(self.refresh_token).map_err(|e| {
            let mut errors = BTreeMap::new();
            errors.insert("refreshToken".to_string(), e.to_string());
            ApiError::Validation(errors)
        })
    }
}
