use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::principal::errors::EmailError;
use crate::principal::errors::UsernameError;
use crate::principal::models::CreatePrincipalCommand;
use crate::principal::models::EmailAddress;
use crate::principal::models::Principal;
use crate::principal::models::Role;
use crate::principal::models::Username;
use crate::principal::ports::PrincipalServicePort;

pub async fn create_principal(
    State(state): State<AppState>,
    Json(body): Json<CreatePrincipalRequest>,
) -> Result<ApiSuccess<CreatePrincipalResponseData>, ApiError> {
    state
        .principal_service
        .create_principal(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::CREATED, principal.into()))
}

/// HTTP request body for registering a principal (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePrincipalRequest {
    username: String,
    email: String,
    full_name: Option<String>,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreatePrincipalRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreatePrincipalRequest {
    fn try_into_command(self) -> Result<CreatePrincipalCommand, ParseCreatePrincipalRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        Ok(CreatePrincipalCommand {
            username,
            email,
            full_name: self.full_name,
            password: self.password,
            // Registration always starts at the lowest-privilege role.
            role: Role::Reception,
        })
    }
}

impl From<ParseCreatePrincipalRequestError> for ApiError {
    fn from(err: ParseCreatePrincipalRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePrincipalResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for CreatePrincipalResponseData {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.to_string(),
            username: principal.username.as_str().to_string(),
            email: principal.email.as_str().to_string(),
            full_name: principal.full_name.clone(),
            role: principal.role.to_string(),
            created_at: principal.created_at,
        }
    }
}
