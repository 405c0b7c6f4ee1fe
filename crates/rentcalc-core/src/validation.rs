//! Required-field checks run before the analysis is shown.
//!
//! The engine itself tolerates missing values; these checks exist so a
//! front end can tell the user which field to fill in first.

use serde::{Deserialize, Serialize};

use crate::analysis::InvestmentInput;
use crate::error::RentCalcError;
use crate::locale::is_num;
use crate::purchase::PurchaseInputs;
use crate::rental::RentalInputs;
use crate::RentCalcResult;

fn missing(section: &str, field: &str) -> RentCalcError {
    RentCalcError::MissingField {
        section: section.into(),
        field: field.into(),
    }
}

/// Region, price, deposit, rate and term are required, checked in that order.
pub fn validate_purchase(input: &PurchaseInputs) -> RentCalcResult<()> {
    if input.region.is_none() {
        return Err(missing("purchase", "region"));
    }
    let numeric = [
        ("price", input.price),
        ("down_payment_pct", input.down_payment_pct),
        ("mortgage_rate_pct", input.mortgage_rate_pct),
        ("mortgage_years", input.mortgage_years),
    ];
    match numeric.iter().find(|(_, v)| !is_num(*v)) {
        Some((field, _)) => Err(missing("purchase", field)),
        None => Ok(()),
    }
}

pub fn validate_rental(input: &RentalInputs) -> RentCalcResult<()> {
    if !is_num(input.monthly_rent) {
        return Err(missing("rental", "monthly_rent"));
    }
    if !is_num(input.projection_years) {
        return Err(missing("rental", "projection_years"));
    }
    Ok(())
}

pub fn validate(input: &InvestmentInput) -> RentCalcResult<()> {
    validate_purchase(&input.purchase)?;
    validate_rental(&input.rental)
}

/// A value forced into `[min, max]` and the message explaining the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clamped {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Clamp a field value, reporting what happened. Non-finite values pass
/// through untouched.
pub fn clamp_with_error(value: f64, min: Option<f64>, max: Option<f64>) -> Clamped {
    if value.is_finite() {
        if let Some(max) = max.filter(|m| value > *m) {
            return Clamped {
                value: max,
                error: Some(format!("value cannot be greater than {max}")),
            };
        }
        if let Some(min) = min.filter(|m| value < *m) {
            return Clamped {
                value: min,
                error: Some(format!("value cannot be less than {min}")),
            };
        }
    }
    Clamped { value, error: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purchase::Region;

    fn complete_purchase() -> PurchaseInputs {
        PurchaseInputs {
            price: 250000.0,
            down_payment_pct: 20.0,
            mortgage_rate_pct: 3.0,
            mortgage_years: 25.0,
            region: Some(Region::Madrid),
            ..PurchaseInputs::default()
        }
    }

    #[test]
    fn test_complete_purchase_passes() {
        assert!(validate_purchase(&complete_purchase()).is_ok());
    }

    #[test]
    fn test_first_missing_purchase_field_is_reported() {
        let mut input = complete_purchase();
        input.mortgage_rate_pct = f64::NAN;
        input.mortgage_years = f64::NAN;
        let err = validate_purchase(&input).unwrap_err();
        assert!(matches!(
            err,
            RentCalcError::MissingField { ref field, .. } if field == "mortgage_rate_pct"
        ));

        input.region = None;
        let err = validate_purchase(&input).unwrap_err();
        assert_eq!(err.to_string(), "Missing required purchase field: region");
    }

    #[test]
    fn test_rental_requires_rent() {
        let mut input = RentalInputs::default();
        assert!(validate_rental(&input).is_err());
        input.monthly_rent = 900.0;
        assert!(validate_rental(&input).is_ok());
        input.projection_years = f64::NAN;
        assert!(validate_rental(&input).is_err());
    }

    #[test]
    fn test_clamp_above_max() {
        let c = clamp_with_error(150.0, Some(0.0), Some(100.0));
        assert_eq!(c.value, 100.0);
        assert_eq!(c.error.as_deref(), Some("value cannot be greater than 100"));
    }

    #[test]
    fn test_clamp_below_min() {
        let c = clamp_with_error(-5.0, Some(0.0), Some(100.0));
        assert_eq!(c.value, 0.0);
        assert_eq!(c.error.as_deref(), Some("value cannot be less than 0"));
    }

    #[test]
    fn test_clamp_in_range_and_nan() {
        assert_eq!(clamp_with_error(42.0, Some(0.0), Some(100.0)).error, None);
        let c = clamp_with_error(f64::NAN, Some(0.0), Some(100.0));
        assert!(c.value.is_nan());
        assert!(c.error.is_none());
        assert_eq!(clamp_with_error(1e9, None, None).value, 1e9);
    }
}
