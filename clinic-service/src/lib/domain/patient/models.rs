use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::patient::errors::PatientIdError;
use crate::patient::errors::PhoneNumberError;
use crate::principal::models::EmailAddress;

/// Patient record managed by reception staff.
#[derive(Debug, Clone)]
pub struct Patient {
    pub id: PatientId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: PhoneNumber,
    pub email: Option<EmailAddress>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Patient unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatientId(pub Uuid);

impl PatientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a patient ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PatientIdError> {
        Uuid::parse_str(s)
            .map(PatientId)
            .map_err(|e| PatientIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PatientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type: exactly nine digits, unique per patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const LENGTH: usize = 9;

    /// Create a validated phone number.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not exactly nine ASCII digits
    pub fn new(phone: String) -> Result<Self, PhoneNumberError> {
        if phone.len() == Self::LENGTH && phone.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(phone))
        } else {
            Err(PhoneNumberError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new patient with domain types
#[derive(Debug)]
pub struct CreatePatientCommand {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: PhoneNumber,
    pub email: Option<EmailAddress>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Command to update an existing patient; only provided fields are applied.
#[derive(Debug, Default)]
pub struct UpdatePatientCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<PhoneNumber>,
    pub email: Option<EmailAddress>,
    pub date_of_birth: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_validation() {
        assert!(PhoneNumber::new("123456789".to_string()).is_ok());
        assert!(PhoneNumber::new("12345678".to_string()).is_err());
        assert!(PhoneNumber::new("1234567890".to_string()).is_err());
        assert!(PhoneNumber::new("12345678a".to_string()).is_err());
    }
}
