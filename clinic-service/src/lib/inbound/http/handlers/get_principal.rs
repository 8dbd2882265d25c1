use axum::extract::Path;
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
use crate::principal::models::PrincipalId;
use crate::principal::ports::PrincipalServicePort;

pub async fn get_principal(
    State(state): State<AppState>,
    _current: CurrentPrincipal,
    Path(principal_id): Path<String>,
) -> Result<ApiSuccess<GetPrincipalResponseData>, ApiError> {
    let principal_id = PrincipalId::from_string(&principal_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .principal_service
        .get_principal(&principal_id)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::OK, principal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetPrincipalResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for GetPrincipalResponseData {
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
