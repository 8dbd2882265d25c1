use axum::extract::State;
use axum::http::StatusCode;

use super::PatientResponseData;
use crate::inbound::http::guard::CurrentPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::patient::ports::PatientServicePort;
use crate::principal::models::Role;
use crate::principal::service::require_role;

/// List every registered patient. Reception only.
pub async fn list_patients(
    State(state): State<AppState>,
    current: CurrentPrincipal,
) -> Result<ApiSuccess<Vec<PatientResponseData>>, ApiError> {
    require_role(&current.0, Role::Reception)?;

    state
        .patient_service
        .list_patients()
        .await
        .map_err(ApiError::from)
        .map(|patients| ApiSuccess::new(StatusCode::OK, patients.iter().map(Into::into).collect()))
}
