use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::patient::errors::PatientError;
use crate::patient::models::Patient;
use crate::patient::models::PatientId;
use crate::patient::models::PhoneNumber;
use crate::patient::ports::PatientRepository;
use crate::principal::models::EmailAddress;

const SELECT_PATIENT: &str = r#"
    SELECT id, first_name, last_name, phone, email, date_of_birth, created_at
    FROM patients
"#;

pub struct PostgresPatientRepository {
    pool: PgPool,
}

impl PostgresPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PatientRow {
    id: Uuid,
    first_name: String,
    last_name: Option<String>,
    phone: String,
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PatientRow> for Patient {
    type Error = PatientError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        Ok(Patient {
            id: PatientId(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: PhoneNumber::new(row.phone)?,
            email: row.email.map(EmailAddress::new).transpose()?,
            date_of_birth: row.date_of_birth,
            created_at: row.created_at,
        })
    }
}

fn map_insert_error(e: sqlx::Error, patient: &Patient) -> PatientError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("patients_phone_key") {
            return PatientError::PhoneAlreadyExists(patient.phone.as_str().to_string());
        }
    }
    PatientError::DatabaseError(e.to_string())
}

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    async fn create(&self, patient: Patient) -> Result<Patient, PatientError> {
        sqlx::query(
            r#"
            INSERT INTO patients (id, first_name, last_name, phone, email, date_of_birth, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(patient.id.0)
        .bind(&patient.first_name)
        .bind(patient.last_name.as_deref())
        .bind(patient.phone.as_str())
        .bind(patient.email.as_ref().map(|e| e.as_str()))
        .bind(patient.date_of_birth)
        .bind(patient.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &patient))?;

        Ok(patient)
    }

    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientError> {
        let row: Option<PatientRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PATIENT))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        row.map(Patient::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Patient>, PatientError> {
        let rows: Vec<PatientRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_PATIENT))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Patient::try_from).collect()
    }

    async fn update(&self, patient: Patient) -> Result<Patient, PatientError> {
        let result = sqlx::query(
            r#"
            UPDATE patients
            SET first_name = $2, last_name = $3, phone = $4, email = $5, date_of_birth = $6
            WHERE id = $1
            "#,
        )
        .bind(patient.id.0)
        .bind(&patient.first_name)
        .bind(patient.last_name.as_deref())
        .bind(patient.phone.as_str())
        .bind(patient.email.as_ref().map(|e| e.as_str()))
        .bind(patient.date_of_birth)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &patient))?;

        if result.rows_affected() == 0 {
            return Err(PatientError::NotFound(patient.id.to_string()));
        }

        Ok(patient)
    }

    async fn delete(&self, id: &PatientId) -> Result<(), PatientError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PatientError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
