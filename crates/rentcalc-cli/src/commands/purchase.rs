use clap::Args;
use serde_json::{json, Value};

use rentcalc_core::purchase::closing_costs::{
    estimate_appraisal, estimate_closing_costs, resolve_closing_costs,
};
use rentcalc_core::purchase::mortgage::{amortization_schedule, monthly_payment};
use rentcalc_core::purchase::{PropertyType, PurchaseInputs, Region};

use crate::input::locale_number;

/// Arguments for the closing-cost estimate
#[derive(Args)]
pub struct ClosingCostsArgs {
    /// Purchase price
    #[arg(long, value_parser = locale_number)]
    pub price: f64,

    /// Region whose transfer tax rates apply
    #[arg(long)]
    pub region: Option<Region>,

    /// The home is a new build (VAT + AJD instead of ITP)
    #[arg(long)]
    pub new_build: bool,
}

pub fn run_closing_costs(args: ClosingCostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let purchase = PurchaseInputs {
        price: args.price,
        region: args.region,
        property_type: if args.new_build {
            PropertyType::New
        } else {
            PropertyType::Existing
        },
        ..PurchaseInputs::default()
    };

    Ok(json!({
        "estimate": estimate_closing_costs(args.price),
        "appraisal": estimate_appraisal(args.price),
        "breakdown": resolve_closing_costs(&purchase),
    }))
}

/// Arguments for a mortgage amortization schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Amount borrowed
    #[arg(long, value_parser = locale_number)]
    pub loan: f64,

    /// Annual interest rate in percent
    #[arg(long, value_parser = locale_number)]
    pub rate: f64,

    /// Term in whole years
    #[arg(long)]
    pub years: u32,
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.years == 0 {
        return Err("--years must be at least 1".into());
    }
    let monthly_rate = args.rate / 100.0 / 12.0;
    let months = args.years.checked_mul(12).ok_or("--years is too large")?;
    tracing::debug!(
        payment = monthly_payment(args.loan, monthly_rate, months),
        "monthly payment"
    );
    let schedule = amortization_schedule(args.loan, monthly_rate, months, args.years);
    Ok(serde_json::to_value(schedule)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(years: u32) -> AmortizationArgs {
        AmortizationArgs {
            loan: 200000.0,
            rate: 3.0,
            years,
        }
    }

    #[test]
    fn test_amortization_rejects_oversized_term() {
        let err = run_amortization(args(u32::MAX)).unwrap_err();
        assert_eq!(err.to_string(), "--years is too large");
    }

    #[test]
    fn test_amortization_rejects_zero_term() {
        assert!(run_amortization(args(0)).is_err());
    }

    #[test]
    fn test_amortization_one_row_per_year() {
        let value = run_amortization(args(25)).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(25));
    }
}
