//! Constants used throughout the core crate.

/// Default path of the JSON patient store when no explicit path is configured.
pub const DEFAULT_PATIENT_STORE_PATH: &str = "patients.json";

/// Suffix appended to the store filename for the temporary file used during saves.
pub const STORE_TMP_SUFFIX: &str = ".tmp";

/// Contents written to a freshly initialised store.
pub const EMPTY_STORE: &str = "{}\n";

/// Exclusive lower bound for patient age.
pub const MIN_AGE_EXCLUSIVE: i64 = 0;

/// Exclusive upper bound for patient age.
pub const MAX_AGE_EXCLUSIVE: i64 = 120;

/// BMI below this value is classified as underweight.
pub const UNDERWEIGHT_BELOW: f64 = 18.5;

/// BMI below this value (and not underweight) is classified as normal weight.
pub const NORMAL_BELOW: f64 = 25.0;

/// BMI below this value (and not normal) is classified as overweight.
pub const OVERWEIGHT_BELOW: f64 = 30.0;
