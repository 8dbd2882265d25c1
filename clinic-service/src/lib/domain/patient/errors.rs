use thiserror::Error;

use crate::principal::errors::EmailError;

/// Error for PatientId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatientIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Phone number must be exactly 9 digits")]
    InvalidFormat,
}

/// Top-level error for all patient-related operations
#[derive(Debug, Clone, Error)]
pub enum PatientError {
    #[error("Invalid patient ID: {0}")]
    InvalidPatientId(#[from] PatientIdError),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneNumberError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Phone already registered: {0}")]
    PhoneAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
