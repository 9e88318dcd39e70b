//! Input validation utilities.
//!
//! Raw patient payloads arrive as [`PatientInput`] (create) or [`PatientUpdate`] (partial
//! update) and are checked field by field before anything reaches the store.

use crate::constants::{MAX_AGE_EXCLUSIVE, MIN_AGE_EXCLUSIVE};
use crate::patient::Gender;
use crate::{PatientError, PatientResult};
use pms_types::NonEmptyText;

/// Unvalidated fields of a new patient record.
#[derive(Debug, Clone)]
pub struct PatientInput {
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

/// Unvalidated partial update; `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl PatientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }
}

/// Validates a patient id used as a store key.
pub fn validate_patient_id(id: &str) -> PatientResult<NonEmptyText> {
    NonEmptyText::new(id).map_err(|_| PatientError::InvalidInput("id cannot be empty".into()))
}

/// Validates a free-text field, trimming surrounding whitespace.
pub fn validate_text(field: &str, value: &str) -> PatientResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| PatientError::InvalidInput(format!("{field} cannot be empty")))
}

/// Validates that age lies strictly between 0 and 120.
pub fn validate_age(age: i64) -> PatientResult<u32> {
    if age <= MIN_AGE_EXCLUSIVE || age >= MAX_AGE_EXCLUSIVE {
        return Err(PatientError::InvalidInput(format!(
            "age must be greater than {MIN_AGE_EXCLUSIVE} and less than {MAX_AGE_EXCLUSIVE}"
        )));
    }
    u32::try_from(age).map_err(|_| PatientError::InvalidInput("age is out of range".into()))
}

/// Validates a gender literal. Matching is exact: `Male`, `Female` or `Other`.
pub fn validate_gender(gender: &str) -> PatientResult<Gender> {
    gender.parse().map_err(|_| {
        PatientError::InvalidInput(format!(
            "gender must be one of {}",
            Gender::ALL.map(|g| g.as_str()).join(", ")
        ))
    })
}

/// Validates a measurement that must be a finite number greater than zero.
pub fn validate_positive(field: &str, value: f64) -> PatientResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PatientError::InvalidInput(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_age_bounds_are_exclusive() {
        assert!(validate_age(0).is_err());
        assert!(validate_age(-3).is_err());
        assert!(validate_age(120).is_err());
        assert_eq!(validate_age(1).unwrap(), 1);
        assert_eq!(validate_age(119).unwrap(), 119);
    }

    #[test]
    fn test_validate_gender_accepts_exact_literals_only() {
        assert_eq!(validate_gender("Male").unwrap(), Gender::Male);
        assert_eq!(validate_gender("Other").unwrap(), Gender::Other);
        let err = validate_gender("male").unwrap_err();
        assert!(
            matches!(err, PatientError::InvalidInput(msg) if msg == "gender must be one of Male, Female, Other")
        );
    }

    #[test]
    fn test_validate_positive_rejects_zero_negative_and_nan() {
        assert!(validate_positive("height", 0.0).is_err());
        assert!(validate_positive("height", -1.2).is_err());
        assert!(validate_positive("weight", f64::NAN).is_err());
        assert_eq!(validate_positive("weight", 72.5).unwrap(), 72.5);
    }

    #[test]
    fn test_validate_text_names_the_field() {
        let err = validate_text("city", "  ").unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg == "city cannot be empty"));
    }

    #[test]
    fn test_validate_patient_id_rejects_blank() {
        assert!(validate_patient_id("").is_err());
        assert_eq!(validate_patient_id(" P001 ").unwrap().as_str(), "P001");
    }

    #[test]
    fn test_patient_update_is_empty() {
        assert!(PatientUpdate::default().is_empty());
        let update = PatientUpdate {
            age: Some(40),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
