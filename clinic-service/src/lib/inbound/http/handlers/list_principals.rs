use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::guard::CurrentPrincipal;
use crate::inbound::http::router::AppState;
use crate::principal::models::Principal;
use crate::principal::models::Role;
use crate::principal::ports::PrincipalServicePort;
use crate::principal::service::require_role;

/// List every registered principal. Admin only.
pub async fn list_principals(
    State(state): State<AppState>,
    current: CurrentPrincipal,
) -> Result<ApiSuccess<Vec<ListPrincipalsResponseData>>, ApiError> {
    require_role(&current.0, Role::Admin)?;

    state
        .principal_service
        .list_principals()
        .await
        .map_err(ApiError::from)
        .map(|principals| {
            ApiSuccess::new(
                StatusCode::OK,
                principals.iter().map(Into::into).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPrincipalsResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for ListPrincipalsResponseData {
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
