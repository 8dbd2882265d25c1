//! Authentication infrastructure library
//!
//! Provides the stateless building blocks the clinic service authenticates with:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded access and refresh tokens
//! - Credential verification coordinated into a token pair
//!
//! Persistence and role checks live in the service; this crate never touches
//! a database. Token validity is entirely determined by signature and expiry
//! at decode time, so there is no session state to share between calls.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let token = tokens
//!     .issue_access(Claims::new().with_subject("alice@example.com"))
//!     .unwrap();
//! let decoded = tokens.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("alice@example.com"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue the token pair
//! let claims = Claims::new().with_subject("alice@example.com");
//! let pair = auth.authenticate("password123", &hash, claims).unwrap();
//! assert_eq!(pair.token_type, "bearer");
//!
//! // Validate the access token later
//! let decoded = auth.validate_token(&pair.access_token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("alice@example.com"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
