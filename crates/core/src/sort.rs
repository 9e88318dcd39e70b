//! Ordering of patient records by a numeric field.

use crate::patient::{Patient, PatientStore};
use crate::{PatientError, PatientResult};
use std::str::FromStr;

/// Numeric field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    fn key(&self, patient: &Patient) -> f64 {
        match self {
            SortField::Height => patient.height(),
            SortField::Weight => patient.weight(),
            SortField::Bmi => patient.bmi(),
        }
    }
}

impl FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            _ => Err(PatientError::InvalidQuery(
                "Invalid field select from ['height', 'weight', 'bmi']".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(PatientError::InvalidQuery(
                "Invalid order select between asc and desc".into(),
            )),
        }
    }
}

/// Parses raw query values; a missing order defaults to ascending.
pub fn parse_sort_params(
    sort_by: &str,
    order: Option<&str>,
) -> PatientResult<(SortField, SortOrder)> {
    let field = sort_by.parse::<SortField>()?;
    let order = order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default();
    Ok((field, order))
}

/// Returns the store's records ordered by `field`; ids are dropped.
///
/// The sort is stable in both directions: records with equal keys keep their store order.
pub fn sort_patients(store: &PatientStore, field: SortField, order: SortOrder) -> Vec<Patient> {
    let mut patients: Vec<Patient> = store.values().cloned().collect();
    patients.sort_by(|a, b| {
        let ord = field.key(a).total_cmp(&field.key(b));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    patients
}

#[cfg(test)]
mod tests {
    use super::*;
    use pms_types::NonEmptyText;

    fn patient(name: &str, height: f64, weight: f64) -> Patient {
        Patient::new(
            NonEmptyText::new(name).unwrap(),
            NonEmptyText::new("Pune").unwrap(),
            30,
            crate::Gender::Other,
            height,
            weight,
        )
        .unwrap()
    }

    fn names(patients: &[Patient]) -> Vec<&str> {
        patients.iter().map(|p| p.name().as_str()).collect()
    }

    fn store() -> PatientStore {
        // bmi: a = 18.0, b = 30.5, c = 22.1
        [
            ("P1".to_string(), patient("a", 1.0, 18.0)),
            ("P2".to_string(), patient("b", 1.0, 30.5)),
            ("P3".to_string(), patient("c", 1.0, 22.1)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sort_by_bmi_ascending_and_descending() {
        let store = store();
        let asc = sort_patients(&store, SortField::Bmi, SortOrder::Asc);
        assert_eq!(names(&asc), vec!["a", "c", "b"]);

        let desc = sort_patients(&store, SortField::Bmi, SortOrder::Desc);
        assert_eq!(names(&desc), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let store: PatientStore = [
            ("P1".to_string(), patient("first", 1.8, 70.0)),
            ("P2".to_string(), patient("second", 1.6, 70.0)),
            ("P3".to_string(), patient("third", 1.7, 70.0)),
        ]
        .into_iter()
        .collect();

        let asc = sort_patients(&store, SortField::Weight, SortOrder::Asc);
        assert_eq!(names(&asc), vec!["first", "second", "third"]);
        let desc = sort_patients(&store, SortField::Weight, SortOrder::Desc);
        assert_eq!(names(&desc), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parse_sort_params_defaults_to_ascending() {
        let (field, order) = parse_sort_params("height", None).unwrap();
        assert_eq!(field, SortField::Height);
        assert_eq!(order, SortOrder::Asc);
    }

    #[test]
    fn test_parse_sort_params_rejects_unknown_field() {
        let err = parse_sort_params("name", Some("asc")).unwrap_err();
        assert!(matches!(err, PatientError::InvalidQuery(msg)
            if msg.contains("height") && msg.contains("weight") && msg.contains("bmi")));
    }

    #[test]
    fn test_parse_sort_params_rejects_unknown_order() {
        let err = parse_sort_params("bmi", Some("up")).unwrap_err();
        assert!(matches!(err, PatientError::InvalidQuery(msg) if msg.contains("asc and desc")));
    }
}
