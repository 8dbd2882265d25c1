use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::PatientResponseData;
use crate::inbound::http::guard::CurrentPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::patient::errors::PhoneNumberError;
use crate::patient::models::PatientId;
use crate::patient::models::PhoneNumber;
use crate::patient::models::UpdatePatientCommand;
use crate::patient::ports::PatientServicePort;
use crate::principal::errors::EmailError;
use crate::principal::models::EmailAddress;
use crate::principal::models::Role;
use crate::principal::service::require_role;

/// Partially update a patient; absent fields keep their stored values.
/// Reception only.
pub async fn update_patient(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Path(patient_id): Path<String>,
    Json(body): Json<UpdatePatientRequest>,
) -> Result<ApiSuccess<PatientResponseData>, ApiError> {
    require_role(&current.0, Role::Reception)?;

    let patient_id =
        PatientId::from_string(&patient_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = body.try_into_command()?;

    state
        .patient_service
        .update_patient(&patient_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref patient| ApiSuccess::new(StatusCode::OK, patient.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePatientRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdatePatientRequestError {
    #[error("First name must not be empty")]
    EmptyFirstName,

    #[error("Invalid phone number: {0}")]
    Phone(#[from] PhoneNumberError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl UpdatePatientRequest {
    fn try_into_command(self) -> Result<UpdatePatientCommand, ParseUpdatePatientRequestError> {
        if self
            .first_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ParseUpdatePatientRequestError::EmptyFirstName);
        }
        Ok(UpdatePatientCommand {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone.map(PhoneNumber::new).transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            date_of_birth: self.date_of_birth,
        })
    }
}

impl From<ParseUpdatePatientRequestError> for ApiError {
    fn from(err: ParseUpdatePatientRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
