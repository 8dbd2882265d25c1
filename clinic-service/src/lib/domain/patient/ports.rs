use async_trait::async_trait;

use crate::patient::errors::PatientError;
use crate::patient::models::CreatePatientCommand;
use crate::patient::models::Patient;
use crate::patient::models::PatientId;
use crate::patient::models::UpdatePatientCommand;

/// Port for patient domain service operations.
#[async_trait]
pub trait PatientServicePort: Send + Sync + 'static {
    /// Register a new patient.
    ///
    /// # Errors
    /// * `PhoneAlreadyExists` - Phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_patient(&self, command: CreatePatientCommand)
        -> Result<Patient, PatientError>;

    /// Retrieve patient by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Patient does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_patient(&self, id: &PatientId) -> Result<Patient, PatientError>;

    /// Retrieve all patients.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_patients(&self) -> Result<Vec<Patient>, PatientError>;

    /// Update an existing patient; only provided fields are applied.
    ///
    /// # Errors
    /// * `NotFound` - Patient does not exist
    /// * `PhoneAlreadyExists` - New phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_patient(
        &self,
        id: &PatientId,
        command: UpdatePatientCommand,
    ) -> Result<Patient, PatientError>;

    /// Delete an existing patient.
    ///
    /// # Errors
    /// * `NotFound` - Patient does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_patient(&self, id: &PatientId) -> Result<(), PatientError>;
}

/// Persistence operations for the patient aggregate.
#[async_trait]
pub trait PatientRepository: Send + Sync + 'static {
    /// Persist a new patient.
    ///
    /// # Errors
    /// * `PhoneAlreadyExists` - Phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, patient: Patient) -> Result<Patient, PatientError>;

    /// Retrieve patient by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientError>;

    /// Retrieve all patients.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Patient>, PatientError>;

    /// Update an existing patient.
    ///
    /// # Errors
    /// * `NotFound` - Patient does not exist
    /// * `PhoneAlreadyExists` - New phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, patient: Patient) -> Result<Patient, PatientError>;

    /// Remove a patient.
    ///
    /// # Errors
    /// * `NotFound` - Patient does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &PatientId) -> Result<(), PatientError>;
}
