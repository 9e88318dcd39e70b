//! Patient record model.
//!
//! A [`Patient`] is the value stored against a patient id in the [`PatientStore`]. The id
//! is the map key and is never duplicated inside the record. `bmi` and `verdict` are
//! derived from `height` and `weight` and are recomputed whenever either changes; there is
//! no way to set them directly.

use crate::bmi::{self, Verdict};
use crate::validation::{self, PatientInput, PatientUpdate};
use crate::PatientResult;
use pms_types::{NonEmptyText, OrderedMap};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The whole store: patient id to record, in insertion order.
pub type PatientStore = OrderedMap<Patient>;

/// Patient gender as recorded in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or(())
    }
}

/// A stored patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    name: NonEmptyText,
    city: NonEmptyText,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
    bmi: f64,
    verdict: Verdict,
}

impl Patient {
    /// Builds a record from already-validated fields and computes the derived fields.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if height and weight do not give a finite BMI.
    pub fn new(
        name: NonEmptyText,
        city: NonEmptyText,
        age: u32,
        gender: Gender,
        height: f64,
        weight: f64,
    ) -> PatientResult<Self> {
        let (bmi, verdict) = bmi::derive(height, weight)?;
        Ok(Self {
            name,
            city,
            age,
            gender,
            height,
            weight,
            bmi,
            verdict,
        })
    }

    /// Validates a full create payload into a record.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` naming the first field that fails its constraint,
    /// or if height and weight do not give a finite BMI.
    pub fn from_input(input: PatientInput) -> PatientResult<Self> {
        Self::new(
            validation::validate_text("name", &input.name)?,
            validation::validate_text("city", &input.city)?,
            validation::validate_age(input.age)?,
            validation::validate_gender(&input.gender)?,
            validation::validate_positive("height", input.height)?,
            validation::validate_positive("weight", input.weight)?,
        )
    }

    /// Returns a copy of this record with the fields present in `update` applied.
    ///
    /// Absent fields keep their stored value. `bmi` and `verdict` are recomputed from the
    /// resulting height and weight, whichever of the two was supplied.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if any supplied field fails its constraint or the
    /// merged height and weight do not give a finite BMI; the original record is left
    /// untouched.
    pub fn merged_with(&self, update: PatientUpdate) -> PatientResult<Self> {
        let name = match update.name {
            Some(v) => validation::validate_text("name", &v)?,
            None => self.name.clone(),
        };
        let city = match update.city {
            Some(v) => validation::validate_text("city", &v)?,
            None => self.city.clone(),
        };
        let age = match update.age {
            Some(v) => validation::validate_age(v)?,
            None => self.age,
        };
        let gender = match update.gender {
            Some(v) => validation::validate_gender(&v)?,
            None => self.gender,
        };
        let height = match update.height {
            Some(v) => validation::validate_positive("height", v)?,
            None => self.height,
        };
        let weight = match update.weight {
            Some(v) => validation::validate_positive("weight", v)?,
            None => self.weight,
        };

        Self::new(name, city, age, gender, height, weight)
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn city(&self) -> &NonEmptyText {
        &self.city
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatientError;

    fn input() -> PatientInput {
        PatientInput {
            name: "Ananya Verma".into(),
            city: "Guwahati".into(),
            age: 28,
            gender: "Female".into(),
            height: 1.65,
            weight: 90.0,
        }
    }

    #[test]
    fn test_from_input_computes_derived_fields() {
        let patient = Patient::from_input(input()).unwrap();
        assert_eq!(patient.bmi(), 33.06);
        assert_eq!(patient.verdict(), Verdict::Obese);
        assert_eq!(patient.name().as_str(), "Ananya Verma");
    }

    #[test]
    fn test_from_input_rejects_unknown_gender() {
        let mut raw = input();
        raw.gender = "female".into();
        let err = Patient::from_input(raw).unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("gender")));
    }

    #[test]
    fn test_merged_with_partial_keeps_other_fields() {
        let patient = Patient::from_input(input()).unwrap();
        let updated = patient
            .merged_with(PatientUpdate {
                city: Some("Delhi".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.city().as_str(), "Delhi");
        assert_eq!(updated.name(), patient.name());
        assert_eq!(updated.age(), patient.age());
        assert_eq!(updated.height(), patient.height());
        assert_eq!(updated.bmi(), patient.bmi());
    }

    #[test]
    fn test_merged_with_weight_only_recomputes_with_stored_height() {
        let patient = Patient::from_input(input()).unwrap();
        let updated = patient
            .merged_with(PatientUpdate {
                weight: Some(60.0),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.height(), 1.65);
        assert_eq!(updated.bmi(), 22.04);
        assert_eq!(updated.verdict(), Verdict::NormalWeight);
    }

    #[test]
    fn test_merged_with_invalid_field_is_rejected() {
        let patient = Patient::from_input(input()).unwrap();
        let err = patient
            .merged_with(PatientUpdate {
                age: Some(120),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(_)));
    }

    #[test]
    fn test_from_input_rejects_height_that_underflows() {
        let mut raw = input();
        raw.height = 1e-170;
        let err = Patient::from_input(raw).unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("bmi")));
    }

    #[test]
    fn test_merged_with_huge_weight_is_rejected() {
        let patient = Patient::from_input(input()).unwrap();
        let err = patient
            .merged_with(PatientUpdate {
                weight: Some(1e308),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(_)));
        assert_eq!(patient.weight(), 90.0);
    }

    #[test]
    fn test_serialised_record_has_no_id_and_display_verdict() {
        let patient = Patient::from_input(input()).unwrap();
        let value = serde_json::to_value(&patient).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["gender"], "Female");
        assert_eq!(value["verdict"], "Obese");
    }
}
