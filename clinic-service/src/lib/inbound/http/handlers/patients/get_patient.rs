use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::PatientResponseData;
use crate::inbound::http::guard::CurrentPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::patient::models::PatientId;
use crate::patient::ports::PatientServicePort;
use crate::principal::models::Role;
use crate::principal::service::require_role;

/// Retrieve a patient by identifier. Reception only.
pub async fn get_patient(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Path(patient_id): Path<String>,
) -> Result<ApiSuccess<PatientResponseData>, ApiError> {
    require_role(&current.0, Role::Reception)?;

    let patient_id =
        PatientId::from_string(&patient_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .patient_service
        .get_patient(&patient_id)
        .await
        .map_err(ApiError::from)
        .map(|ref patient| ApiSuccess::new(StatusCode::OK, patient.into()))
}
