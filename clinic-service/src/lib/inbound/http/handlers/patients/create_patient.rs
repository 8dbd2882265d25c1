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
use crate::patient::models::CreatePatientCommand;
use crate::patient::models::PhoneNumber;
use crate::patient::ports::PatientServicePort;
use crate::principal::errors::EmailError;
use crate::principal::models::EmailAddress;
use crate::principal::models::Role;
use crate::principal::service::require_role;

/// Register a new patient. Reception only.
pub async fn create_patient(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Json(body): Json<CreatePatientRequest>,
) -> Result<ApiSuccess<PatientResponseData>, ApiError> {
    require_role(&current.0, Role::Reception)?;

    state
        .patient_service
        .create_patient(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref patient| ApiSuccess::new(StatusCode::CREATED, patient.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePatientRequest {
    first_name: String,
    last_name: Option<String>,
    phone: String,
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreatePatientRequestError {
    #[error("First name must not be empty")]
    EmptyFirstName,

    #[error("Invalid phone number: {0}")]
    Phone(#[from] PhoneNumberError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreatePatientRequest {
    fn try_into_command(self) -> Result<CreatePatientCommand, ParseCreatePatientRequestError> {
        if self.first_name.trim().is_empty() {
            return Err(ParseCreatePatientRequestError::EmptyFirstName);
        }
        let phone = PhoneNumber::new(self.phone)?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        Ok(CreatePatientCommand {
            first_name: self.first_name,
            last_name: self.last_name,
            phone,
            email,
            date_of_birth: self.date_of_birth,
        })
    }
}

impl From<ParseCreatePatientRequestError> for ApiError {
    fn from(err: ParseCreatePatientRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
