//! Body-mass index calculation and weight classification.
//!
//! Both derived patient fields are produced here and nowhere else, so the create and update
//! paths cannot disagree on thresholds or rounding.

use crate::constants::{NORMAL_BELOW, OVERWEIGHT_BELOW, UNDERWEIGHT_BELOW};
use crate::{PatientError, PatientResult};
use serde::{Deserialize, Serialize};

/// Weight classification derived from BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::NormalWeight => "Normal weight",
            Verdict::Overweight => "Overweight",
            Verdict::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes `weight / height²` rounded to two decimal places.
///
/// A non-positive height yields `0.0` instead of dividing by zero. Exact halves round to
/// the even neighbour, so `22.125` becomes `22.12`. Extreme inputs can still give an
/// infinite result; [`derive`] rejects those.
pub fn calculate_bmi(height: f64, weight: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    round_to_hundredths(weight / (height * height))
}

/// Classifies a BMI value into a [`Verdict`].
pub fn classify(bmi: f64) -> Verdict {
    if bmi < UNDERWEIGHT_BELOW {
        Verdict::Underweight
    } else if bmi < NORMAL_BELOW {
        Verdict::NormalWeight
    } else if bmi < OVERWEIGHT_BELOW {
        Verdict::Overweight
    } else {
        Verdict::Obese
    }
}

/// Computes both derived fields for a height/weight pair.
///
/// # Errors
///
/// Returns `PatientError::InvalidInput` if the pair does not give a finite BMI, e.g. a
/// height so small that its square underflows to zero. JSON has no encoding for such a
/// value, so it must never reach the store.
pub fn derive(height: f64, weight: f64) -> PatientResult<(f64, Verdict)> {
    let bmi = calculate_bmi(height, weight);
    if !bmi.is_finite() {
        return Err(PatientError::InvalidInput(
            "height and weight must give a finite bmi".into(),
        ));
    }
    Ok((bmi, classify(bmi)))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_bmi_rounds_to_two_places() {
        assert_eq!(calculate_bmi(1.75, 70.0), 22.86);
        assert_eq!(calculate_bmi(1.6, 45.0), 17.58);
        assert_eq!(calculate_bmi(2.0, 100.0), 25.0);
    }

    #[test]
    fn test_calculate_bmi_exact_half_rounds_to_even() {
        // 88.5 / 4 is exactly 22.125.
        assert_eq!(calculate_bmi(2.0, 88.5), 22.12);
        // 90.5 / 4 is exactly 22.625.
        assert_eq!(calculate_bmi(2.0, 90.5), 22.62);
    }

    #[test]
    fn test_calculate_bmi_zero_height_is_zero() {
        assert_eq!(calculate_bmi(0.0, 80.0), 0.0);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(18.49), Verdict::Underweight);
        assert_eq!(classify(18.5), Verdict::NormalWeight);
        assert_eq!(classify(24.999), Verdict::NormalWeight);
        assert_eq!(classify(25.0), Verdict::Overweight);
        assert_eq!(classify(29.99), Verdict::Overweight);
        assert_eq!(classify(30.0), Verdict::Obese);
    }

    #[test]
    fn test_derive_uses_rounded_bmi_for_verdict() {
        // 18.4999... rounds to 18.5, which is normal weight.
        let (bmi, verdict) = derive(1.0, 18.499_9).unwrap();
        assert_eq!(bmi, 18.5);
        assert_eq!(verdict, Verdict::NormalWeight);
    }

    #[test]
    fn test_calculate_bmi_extreme_inputs_are_not_finite() {
        assert!(!calculate_bmi(1e-170, 70.0).is_finite());
        assert!(!calculate_bmi(1.0, 1e308).is_finite());
    }

    #[test]
    fn test_derive_rejects_non_finite_bmi() {
        assert!(matches!(
            derive(1e-170, 70.0),
            Err(PatientError::InvalidInput(msg)) if msg.contains("finite")
        ));
        assert!(matches!(
            derive(1.0, 1e308),
            Err(PatientError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_derive_accepts_large_finite_bmi() {
        let (bmi, verdict) = derive(1e-3, 70.0).unwrap();
        assert!(bmi.is_finite());
        assert!(bmi > 69_999_999.0);
        assert_eq!(verdict, Verdict::Obese);
    }

    #[test]
    fn test_verdict_serialises_with_display_names() {
        assert_eq!(
            serde_json::to_string(&Verdict::NormalWeight).unwrap(),
            "\"Normal weight\""
        );
        assert_eq!(Verdict::Obese.to_string(), "Obese");
    }
}
