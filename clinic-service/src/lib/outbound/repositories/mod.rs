pub mod patient;
pub mod principal;

pub use patient::PostgresPatientRepository;
pub use principal::PostgresPrincipalRepository;
