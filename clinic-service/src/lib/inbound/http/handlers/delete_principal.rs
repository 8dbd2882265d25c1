use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::guard::CurrentPrincipal;
use crate::inbound::http::router::AppState;
use crate::principal::models::PrincipalId;
use crate::principal::models::Role;
use crate::principal::ports::PrincipalServicePort;
use crate::principal::service::require_role;

/// Delete a principal together with its doctor profile, if any. Admin only.
pub async fn delete_principal(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Path(principal_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    require_role(&current.0, Role::Admin)?;

    let principal_id = PrincipalId::from_string(&principal_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .principal_service
        .delete_principal(&principal_id)
        .await
        .map_err(ApiError::from)
        .map(|()| ApiSuccess::new(StatusCode::OK, ()))
}
