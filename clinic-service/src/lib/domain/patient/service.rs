use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::patient::errors::PatientError;
use crate::patient::models::CreatePatientCommand;
use crate::patient::models::Patient;
use crate::patient::models::PatientId;
use crate::patient::models::UpdatePatientCommand;
use crate::patient::ports::PatientRepository;
use crate::patient::ports::PatientServicePort;

/// Domain service for patient operations.
pub struct PatientService<PR>
where
    PR: PatientRepository,
{
    repository: Arc<PR>,
}

impl<PR> PatientService<PR>
where
    PR: PatientRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PatientServicePort for PatientService<PR>
where
    PR: PatientRepository,
{
    async fn create_patient(
        &self,
        command: CreatePatientCommand,
    ) -> Result<Patient, PatientError> {
        let patient = Patient {
            id: PatientId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            phone: command.phone,
            email: command.email,
            date_of_birth: command.date_of_birth,
            created_at: Utc::now(),
        };

        self.repository.create(patient).await
    }

    async fn get_patient(&self, id: &PatientId) -> Result<Patient, PatientError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PatientError::NotFound(id.to_string()))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        self.repository.list_all().await
    }

    async fn update_patient(
        &self,
        id: &PatientId,
        command: UpdatePatientCommand,
    ) -> Result<Patient, PatientError> {
        let mut patient = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PatientError::NotFound(id.to_string()))?;

        if let Some(first_name) = command.first_name {
            patient.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            patient.last_name = Some(last_name);
        }

        if let Some(phone) = command.phone {
            patient.phone = phone;
        }

        if let Some(email) = command.email {
            patient.email = Some(email);
        }

        if let Some(date_of_birth) = command.date_of_birth {
            patient.date_of_birth = Some(date_of_birth);
        }

        self.repository.update(patient).await
    }

    async fn delete_patient(&self, id: &PatientId) -> Result<(), PatientError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::patient::models::PhoneNumber;

    mock! {
        pub TestPatientRepository {}

        #[async_trait]
        impl PatientRepository for TestPatientRepository {
            async fn create(&self, patient: Patient) -> Result<Patient, PatientError>;
            async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientError>;
            async fn list_all(&self) -> Result<Vec<Patient>, PatientError>;
            async fn update(&self, patient: Patient) -> Result<Patient, PatientError>;
            async fn delete(&self, id: &PatientId) -> Result<(), PatientError>;
        }
    }

    fn sample_patient() -> Patient {
        Patient {
            id: PatientId::new(),
            first_name: "John".to_string(),
            last_name: None,
            phone: PhoneNumber::new("123456789".to_string()).unwrap(),
            email: None,
            date_of_birth: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_patient_success() {
        let mut repository = MockTestPatientRepository::new();

        repository
            .expect_create()
            .withf(|patient| {
                patient.first_name == "John" && patient.phone.as_str() == "123456789"
            })
            .times(1)
            .returning(|patient| Ok(patient));

        let service = PatientService::new(Arc::new(repository));

        let command = CreatePatientCommand {
            first_name: "John".to_string(),
            last_name: None,
            phone: PhoneNumber::new("123456789".to_string()).unwrap(),
            email: None,
            date_of_birth: None,
        };

        let patient = service.create_patient(command).await.unwrap();
        assert_eq!(patient.first_name, "John");
    }

    #[tokio::test]
    async fn test_create_patient_duplicate_phone() {
        let mut repository = MockTestPatientRepository::new();

        repository.expect_create().times(1).returning(|patient| {
            Err(PatientError::PhoneAlreadyExists(
                patient.phone.as_str().to_string(),
            ))
        });

        let service = PatientService::new(Arc::new(repository));

        let command = CreatePatientCommand {
            first_name: "John".to_string(),
            last_name: None,
            phone: PhoneNumber::new("123456789".to_string()).unwrap(),
            email: None,
            date_of_birth: None,
        };

        let result = service.create_patient(command).await;
        assert!(matches!(result, Err(PatientError::PhoneAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_patient_partial() {
        let mut repository = MockTestPatientRepository::new();
        let existing = sample_patient();
        let id = existing.id;

        let returned = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_update()
            .withf(|patient| {
                patient.first_name == "Johnny" && patient.phone.as_str() == "123456789"
            })
            .times(1)
            .returning(|patient| Ok(patient));

        let service = PatientService::new(Arc::new(repository));

        let command = UpdatePatientCommand {
            first_name: Some("Johnny".to_string()),
            ..Default::default()
        };

        let updated = service.update_patient(&id, command).await.unwrap();
        assert_eq!(updated.first_name, "Johnny");
    }

    #[tokio::test]
    async fn test_get_patient_not_found() {
        let mut repository = MockTestPatientRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = PatientService::new(Arc::new(repository));

        let result = service.get_patient(&PatientId::new()).await;
        assert!(matches!(result, Err(PatientError::NotFound(_))));
    }
}
