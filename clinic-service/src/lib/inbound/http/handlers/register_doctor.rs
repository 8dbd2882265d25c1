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
use crate::principal::errors::EmailError;
use crate::principal::errors::UsernameError;
use crate::principal::models::EmailAddress;
use crate::principal::models::Principal;
use crate::principal::models::RegisterDoctorCommand;
use crate::principal::models::Role;
use crate::principal::models::Username;
use crate::principal::ports::PrincipalServicePort;
use crate::principal::service::require_role;

/// Register a doctor: a `doctor`-role principal plus its specialization
/// profile, created together. Admin only.
pub async fn register_doctor(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Json(body): Json<RegisterDoctorRequest>,
) -> Result<ApiSuccess<RegisterDoctorResponseData>, ApiError> {
    require_role(&current.0, Role::Admin)?;

    state
        .principal_service
        .register_doctor(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::CREATED, principal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterDoctorRequest {
    username: String,
    email: String,
    full_name: Option<String>,
    password: String,
    specialization: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterDoctorRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Specialization must not be empty")]
    EmptySpecialization,
}

impl RegisterDoctorRequest {
    fn try_into_command(self) -> Result<RegisterDoctorCommand, ParseRegisterDoctorRequestError> {
        if self.specialization.trim().is_empty() {
            return Err(ParseRegisterDoctorRequestError::EmptySpecialization);
        }
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterDoctorCommand {
            username,
            email,
            full_name: self.full_name,
            password: self.password,
            specialization: self.specialization.trim().to_string(),
        })
    }
}

impl From<ParseRegisterDoctorRequestError> for ApiError {
    fn from(err: ParseRegisterDoctorRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterDoctorResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for RegisterDoctorResponseData {
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
