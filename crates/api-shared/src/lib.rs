//! # API Shared
//!
//! Wire types for the patient management API.
//!
//! Contains:
//! - Request and response bodies, with OpenAPI schemas
//! - Query parameter types
//! - Shared services like `HealthService`
//!
//! Field constraints (age range, positive measurements, gender literals) are enforced by
//! `pms-core`, not here. These types only describe the JSON shape.

pub mod health;

pub use health::HealthService;

use pms_types::OrderedMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Plain confirmation or informational message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

/// A stored patient record. The patient id is not part of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub name: String,
    pub city: String,
    pub age: u32,
    /// One of `Male`, `Female`, `Other`
    pub gender: String,
    /// Metres
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    pub bmi: f64,
    /// One of `Underweight`, `Normal weight`, `Overweight`, `Obese`
    pub verdict: String,
}

/// All patients keyed by id, in store order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    #[schema(value_type = Object)]
    pub patients: OrderedMap<PatientRes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GetPatientRes {
    pub patient: PatientRes,
}

/// Patients ordered by the requested field; ids are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SortedPatientsRes {
    pub patients: Vec<PatientRes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    /// Patient id, used as the store key
    #[schema(example = "P001")]
    pub id: String,
    #[schema(example = "Ananya Verma")]
    pub name: String,
    #[schema(example = "Guwahati")]
    pub city: String,
    /// Greater than 0 and less than 120
    #[schema(example = 28)]
    pub age: i64,
    /// One of `Male`, `Female`, `Other`
    #[schema(example = "Female")]
    pub gender: String,
    /// Metres, greater than 0
    #[schema(example = 1.65)]
    pub height: f64,
    /// Kilograms, greater than 0
    #[schema(example = 90.0)]
    pub weight: f64,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdatePatientReq {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// Field to sort by: `height`, `weight` or `bmi`
    pub sort_by: String,
    /// `asc` (default) or `desc`
    pub order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_req_accepts_empty_and_partial_bodies() {
        let empty: UpdatePatientReq = serde_json::from_str("{}").unwrap();
        assert!(empty.name.is_none() && empty.weight.is_none());

        let partial: UpdatePatientReq = serde_json::from_str(r#"{"weight": 72.5}"#).unwrap();
        assert_eq!(partial.weight, Some(72.5));
        assert!(partial.height.is_none());
    }

    #[test]
    fn test_create_req_requires_every_field() {
        let missing_city = r#"{"id":"P1","name":"A","age":30,"gender":"Male","height":1.7,"weight":70}"#;
        assert!(serde_json::from_str::<CreatePatientReq>(missing_city).is_err());
    }

    #[test]
    fn test_health_service_reports_ok() {
        let res = HealthService::check_health();
        assert!(res.ok);
    }
}
