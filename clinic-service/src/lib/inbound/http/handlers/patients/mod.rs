pub mod create_patient;
pub mod delete_patient;
pub mod get_patient;
pub mod list_patients;
pub mod update_patient;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::patient::models::Patient;

/// Patient record as returned by every patient endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientResponseData {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<&Patient> for PatientResponseData {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.to_string(),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            phone: patient.phone.as_str().to_string(),
            email: patient.email.as_ref().map(|e| e.as_str().to_string()),
            date_of_birth: patient.date_of_birth,
            created_at: patient.created_at,
        }
    }
}
