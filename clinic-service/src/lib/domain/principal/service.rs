use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use auth::TokenPair;
use chrono::Utc;

use crate::principal::errors::PrincipalError;
use crate::principal::models::CreatePrincipalCommand;
use crate::principal::models::Principal;
use crate::principal::models::PrincipalId;
use crate::principal::models::RegisterDoctorCommand;
use crate::principal::models::Role;
use crate::principal::models::UpdatePrincipalCommand;
use crate::principal::models::Username;
use crate::principal::ports::PrincipalRepository;
use crate::principal::ports::PrincipalServicePort;

/// Role gate: restrict an operation to principals holding exactly `role`.
///
/// # Errors
/// * `Forbidden` - The principal holds a different role
pub fn require_role(principal: &Principal, role: Role) -> Result<&Principal, PrincipalError> {
    if principal.role != role {
        return Err(PrincipalError::Forbidden { required: role });
    }
    Ok(principal)
}

/// Domain service for principal operations, authentication, and the
/// authorization guard.
pub struct PrincipalService<PR>
where
    PR: PrincipalRepository,
{
    repository: Arc<PR>,
    authenticator: Arc<Authenticator>,
}

impl<PR> PrincipalService<PR>
where
    PR: PrincipalRepository,
{
    pub fn new(repository: Arc<PR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn hashed(&self, password: &str) -> Result<String, PrincipalError> {
        if password.is_empty() {
            return Err(PrincipalError::MissingPassword);
        }
        self.authenticator
            .hash_password(password)
            .map_err(|e| PrincipalError::Unknown(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl<PR> PrincipalServicePort for PrincipalService<PR>
where
    PR: PrincipalRepository,
{
    async fn create_principal(
        &self,
        command: CreatePrincipalCommand,
    ) -> Result<Principal, PrincipalError> {
        let password_hash = self.hashed(&command.password)?;

        let principal = Principal {
            id: PrincipalId::new(),
            username: command.username,
            email: command.email,
            full_name: command.full_name,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        self.repository.create(principal).await
    }

    async fn register_doctor(
        &self,
        command: RegisterDoctorCommand,
    ) -> Result<Principal, PrincipalError> {
        let password_hash = self.hashed(&command.password)?;

        let principal = Principal {
            id: PrincipalId::new(),
            username: command.username,
            email: command.email,
            full_name: command.full_name,
            password_hash,
            role: Role::Doctor,
            created_at: Utc::now(),
        };

        self.repository
            .create_doctor(principal, &command.specialization)
            .await
    }

    async fn get_principal(&self, id: &PrincipalId) -> Result<Principal, PrincipalError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PrincipalError::NotFound(id.to_string()))
    }

    async fn list_principals(&self) -> Result<Vec<Principal>, PrincipalError> {
        self.repository.list_all().await
    }

    async fn update_principal(
        &self,
        id: &PrincipalId,
        command: UpdatePrincipalCommand,
    ) -> Result<Principal, PrincipalError> {
        let mut principal = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PrincipalError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            principal.username = new_username;
        }

        if let Some(new_email) = command.email {
            principal.email = new_email;
        }

        if let Some(new_full_name) = command.full_name {
            principal.full_name = Some(new_full_name);
        }

        if let Some(new_role) = command.role {
            principal.role = new_role;
        }

        if let Some(new_password) = command.password {
            principal.password_hash = self.hashed(&new_password)?;
        }

        self.repository.update(principal).await
    }

    async fn delete_principal(&self, id: &PrincipalId) -> Result<(), PrincipalError> {
        self.repository.delete(id).await
    }

    async fn issue_tokens(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<TokenPair, PrincipalError> {
        // Unknown username and wrong password must be indistinguishable.
        let principal = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(PrincipalError::InvalidCredentials)?;

        let claims = Claims::new().with_subject(principal.email.as_str());

        self.authenticator
            .authenticate(password, &principal.password_hash, claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => PrincipalError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    PrincipalError::Unknown(format!("Password verification failed: {}", err))
                }
                AuthenticationError::TokenError(err) => {
                    PrincipalError::Unknown(format!("Token issuance failed: {}", err))
                }
            })
    }

    async fn resolve_bearer(&self, token: &str) -> Result<Principal, PrincipalError> {
        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|_| PrincipalError::InvalidToken)?;

        let subject = claims.sub.ok_or(PrincipalError::Unauthenticated)?;

        self.repository
            .find_by_email(&subject)
            .await?
            .ok_or(PrincipalError::PrincipalNotFound(subject))
    }
}
