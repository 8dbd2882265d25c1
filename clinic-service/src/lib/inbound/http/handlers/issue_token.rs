use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::principal::models::Username;
use crate::principal::ports::PrincipalServicePort;

/// Token issuance endpoint: verifies credentials and returns the bearer
/// token pair. Any failure is the same 401 so callers cannot probe which
/// usernames exist.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<IssueTokenRequestBody>,
) -> Result<ApiSuccess<IssueTokenResponseData>, ApiError> {
    // A username that does not even parse cannot belong to any principal.
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let pair = state
        .principal_service
        .issue_tokens(&username, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        IssueTokenResponseData {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type.to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueTokenRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}
