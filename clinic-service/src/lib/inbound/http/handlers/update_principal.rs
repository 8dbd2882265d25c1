use axum::extract::Path;
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
use crate::inbound::http::guard::CurrentPrincipal;
use crate::inbound::http::router::AppState;
use crate::principal::models::EmailAddress;
use crate::principal::models::Principal;
use crate::principal::models::PrincipalId;
use crate::principal::models::Role;
use crate::principal::models::UpdatePrincipalCommand;
use crate::principal::models::Username;
use crate::principal::ports::PrincipalServicePort;
use crate::principal::service::require_role;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePrincipalRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplacePrincipalRequest {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdatePrincipalRequestError {
    #[error(transparent)]
    Username(#[from] crate::principal::errors::UsernameError),
    #[error(transparent)]
    Email(#[from] crate::principal::errors::EmailError),
    #[error(transparent)]
    Role(#[from] crate::principal::errors::RoleError),
}

impl From<ParseUpdatePrincipalRequestError> for ApiError {
    fn from(e: ParseUpdatePrincipalRequestError) -> Self {
        Self::UnprocessableEntity(e.to_string())
    }
}

impl UpdatePrincipalRequest {
    fn try_into_command(self) -> Result<UpdatePrincipalCommand, ParseUpdatePrincipalRequestError> {
        Ok(UpdatePrincipalCommand {
            username: self.username.map(Username::new).transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            full_name: self.full_name,
            password: self.password,
            role: self.role.as_deref().map(str::parse::<Role>).transpose()?,
        })
    }
}

impl ReplacePrincipalRequest {
    fn try_into_command(self) -> Result<UpdatePrincipalCommand, ParseUpdatePrincipalRequestError> {
        Ok(UpdatePrincipalCommand {
            username: Some(Username::new(self.username)?),
            email: Some(EmailAddress::new(self.email)?),
            full_name: self.full_name,
            password: Some(self.password),
            role: Some(self.role.parse::<Role>()?),
        })
    }
}

/// Partially update a principal; absent fields keep their stored values.
/// Admin only.
pub async fn update_principal(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Path(principal_id): Path<String>,
    Json(body): Json<UpdatePrincipalRequest>,
) -> Result<ApiSuccess<UpdatePrincipalResponseData>, ApiError> {
    require_role(&current.0, Role::Admin)?;

    let principal_id = PrincipalId::from_string(&principal_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = body.try_into_command()?;

    state
        .principal_service
        .update_principal(&principal_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::OK, principal.into()))
}

/// Replace a principal wholesale; every field must be supplied. Admin only.
pub async fn replace_principal(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Path(principal_id): Path<String>,
    Json(body): Json<ReplacePrincipalRequest>,
) -> Result<ApiSuccess<UpdatePrincipalResponseData>, ApiError> {
    require_role(&current.0, Role::Admin)?;

    let principal_id = PrincipalId::from_string(&principal_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = body.try_into_command()?;

    state
        .principal_service
        .update_principal(&principal_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::OK, principal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePrincipalResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for UpdatePrincipalResponseData {
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
