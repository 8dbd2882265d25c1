use async_trait::async_trait;
use auth::TokenPair;

use crate::principal::errors::PrincipalError;
use crate::principal::models::CreatePrincipalCommand;
use crate::principal::models::Principal;
use crate::principal::models::PrincipalId;
use crate::principal::models::RegisterDoctorCommand;
use crate::principal::models::UpdatePrincipalCommand;
use crate::principal::models::Username;

/// Port for principal domain service operations.
#[async_trait]
pub trait PrincipalServicePort: Send + Sync + 'static {
    /// Create a new principal; the plaintext password is hashed before it
    /// ever reaches the repository.
    ///
    /// # Errors
    /// * `MissingPassword` - Empty password
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_principal(
        &self,
        command: CreatePrincipalCommand,
    ) -> Result<Principal, PrincipalError>;

    /// Register a doctor: a principal with role `doctor` and its one-to-one
    /// specialization profile, created in one transaction.
    ///
    /// # Errors
    /// * `MissingPassword` - Empty password
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register_doctor(
        &self,
        command: RegisterDoctorCommand,
    ) -> Result<Principal, PrincipalError>;

    /// Retrieve principal by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Principal does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_principal(&self, id: &PrincipalId) -> Result<Principal, PrincipalError>;

    /// Retrieve all principals.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_principals(&self) -> Result<Vec<Principal>, PrincipalError>;

    /// Update an existing principal. Only fields present in the command are
    /// applied; a provided password is re-hashed.
    ///
    /// # Errors
    /// * `NotFound` - Principal does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_principal(
        &self,
        id: &PrincipalId,
        command: UpdatePrincipalCommand,
    ) -> Result<Principal, PrincipalError>;

    /// Delete an existing principal; the doctor profile, if any, goes with
    /// it.
    ///
    /// # Errors
    /// * `NotFound` - Principal does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_principal(&self, id: &PrincipalId) -> Result<(), PrincipalError>;

    /// Verify credentials and issue an access/refresh token pair with the
    /// principal's email as subject.
    ///
    /// An unknown username and a wrong password fail identically.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn issue_tokens(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<TokenPair, PrincipalError>;

    /// Validate a bearer token and re-resolve the principal it names.
    ///
    /// A stale token for a deleted account dies here, not at decode time.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure, or expiry check failed
    /// * `Unauthenticated` - Token carries no subject claim
    /// * `PrincipalNotFound` - Subject no longer resolves to a principal
    /// * `DatabaseError` - Database operation failed
    async fn resolve_bearer(&self, token: &str) -> Result<Principal, PrincipalError>;
}

/// Persistence operations for the principal aggregate.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + 'static {
    /// Persist a new principal.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, principal: Principal) -> Result<Principal, PrincipalError>;

    /// Persist a new principal plus its doctor profile atomically.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_doctor(
        &self,
        principal: Principal,
        specialization: &str,
    ) -> Result<Principal, PrincipalError>;

    /// Retrieve principal by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<Principal>, PrincipalError>;

    /// Retrieve principal by unique username (indexed lookup).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, PrincipalError>;

    /// Retrieve principal by unique email, the token subject (indexed
    /// lookup).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, PrincipalError>;

    /// Retrieve all principals.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Principal>, PrincipalError>;

    /// Update an existing principal.
    ///
    /// # Errors
    /// * `NotFound` - Principal does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, principal: Principal) -> Result<Principal, PrincipalError>;

    /// Remove a principal; the doctor profile cascades at the database
    /// level.
    ///
    /// # Errors
    /// * `NotFound` - Principal does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &PrincipalId) -> Result<(), PrincipalError>;
}
