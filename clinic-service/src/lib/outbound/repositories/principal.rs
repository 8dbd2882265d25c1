use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::principal::errors::PrincipalError;
use crate::principal::models::EmailAddress;
use crate::principal::models::Principal;
use crate::principal::models::PrincipalId;
use crate::principal::models::Username;
use crate::principal::ports::PrincipalRepository;

const SELECT_PRINCIPAL: &str = r#"
    SELECT id, username, email, full_name, password_hash, role, created_at
    FROM principals
"#;

const INSERT_PRINCIPAL: &str = r#"
    INSERT INTO principals (id, username, email, full_name, password_hash, role, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
"#;

pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; reconstructed into validated domain types on read.
#[derive(sqlx::FromRow)]
struct PrincipalRow {
    id: Uuid,
    username: String,
    email: String,
    full_name: Option<String>,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PrincipalRow> for Principal {
    type Error = PrincipalError;

    fn try_from(row: PrincipalRow) -> Result<Self, Self::Error> {
        Ok(Principal {
            id: PrincipalId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            full_name: row.full_name,
            password_hash: row.password_hash,
            role: row.role.parse()?,
            created_at: row.created_at,
        })
    }
}

/// Map a unique-constraint violation to the domain duplicate error; anything
/// else surfaces as a database error.
fn map_insert_error(e: sqlx::Error, principal: &Principal) -> PrincipalError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("principals_username_key") {
                return PrincipalError::UsernameAlreadyExists(
                    principal.username.as_str().to_string(),
                );
            }
            if db_err.constraint() == Some("principals_email_key") {
                return PrincipalError::EmailAlreadyExists(principal.email.as_str().to_string());
            }
        }
    }
    PrincipalError::DatabaseError(e.to_string())
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn create(&self, principal: Principal) -> Result<Principal, PrincipalError> {
        sqlx::query(INSERT_PRINCIPAL)
            .bind(principal.id.0)
            .bind(principal.username.as_str())
            .bind(principal.email.as_str())
            .bind(principal.full_name.as_deref())
            .bind(&principal.password_hash)
            .bind(principal.role.as_str())
            .bind(principal.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, &principal))?;

        Ok(principal)
    }

    async fn create_doctor(
        &self,
        principal: Principal,
        specialization: &str,
    ) -> Result<Principal, PrincipalError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PrincipalError::DatabaseError(e.to_string()))?;

        sqlx::query(INSERT_PRINCIPAL)
            .bind(principal.id.0)
            .bind(principal.username.as_str())
            .bind(principal.email.as_str())
            .bind(principal.full_name.as_deref())
            .bind(&principal.password_hash)
            .bind(principal.role.as_str())
            .bind(principal.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, &principal))?;

        sqlx::query("INSERT INTO doctor_profiles (principal_id, specialization) VALUES ($1, $2)")
            .bind(principal.id.0)
            .bind(specialization)
            .execute(&mut *tx)
            .await
            .map_err(|e| PrincipalError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| PrincipalError::DatabaseError(e.to_string()))?;

        Ok(principal)
    }

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<Principal>, PrincipalError> {
        let row: Option<PrincipalRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PRINCIPAL))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PrincipalError::DatabaseError(e.to_string()))?;

        row.map(Principal::try_from).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, PrincipalError> {
        let row: Option<PrincipalRow> =
            sqlx::query_as(&format!("{} WHERE username = $1", SELECT_PRINCIPAL))
                .bind(username.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PrincipalError::DatabaseError(e.to_string()))?;

        row.map(Principal::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, PrincipalError> {
        let row: Option<PrincipalRow> =
            sqlx::query_as(&format!("{} WHERE email = $1", SELECT_PRINCIPAL))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PrincipalError::DatabaseError(e.to_string()))?;

        row.map(Principal::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Principal>, PrincipalError> {
        let rows: Vec<PrincipalRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_PRINCIPAL))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| PrincipalError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Principal::try_from).collect()
    }

    async fn update(&self, principal: Principal) -> Result<Principal, PrincipalError> {
        let result = sqlx::query(
            r#"
            UPDATE principals
            SET username = $2, email = $3, full_name = $4, password_hash = $5, role = $6
            WHERE id = $1
            "#,
        )
        .bind(principal.id.0)
        .bind(principal.username.as_str())
        .bind(principal.email.as_str())
        .bind(principal.full_name.as_deref())
        .bind(&principal.password_hash)
        .bind(principal.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &principal))?;

        if result.rows_affected() == 0 {
            return Err(PrincipalError::NotFound(principal.id.to_string()));
        }

        Ok(principal)
    }

    async fn delete(&self, id: &PrincipalId) -> Result<(), PrincipalError> {
        let result = sqlx::query("DELETE FROM principals WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| PrincipalError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PrincipalError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
