use clap::Args;
use serde_json::{json, Value};

use rentcalc_core::rental::tax::{marginal_rate, rental_income_reduction};
use rentcalc_core::time_value::{irr, npv, DEFAULT_IRR_GUESS};

use crate::input::locale_number;

/// Arguments for the income tax bracket lookup
#[derive(Args)]
pub struct TaxRateArgs {
    /// Net rental income before the reduction
    #[arg(long, value_parser = locale_number)]
    pub base: f64,

    /// Refurbishment spend; any amount raises the reduction to 60%
    #[arg(long, value_parser = locale_number, default_value = "0")]
    pub reform: f64,
}

pub fn run_tax_rate(args: TaxRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let reduction = rental_income_reduction(args.reform);
    let reduced_base = args.base.max(0.0) * (1.0 - reduction);
    let rate = marginal_rate(reduced_base);
    Ok(json!({
        "base": args.base,
        "reduction": reduction,
        "reduced_base": reduced_base,
        "marginal_rate": rate,
        "income_tax": reduced_base * rate,
    }))
}

/// Arguments for the IRR solver
#[derive(Args)]
pub struct IrrArgs {
    /// Yearly cash flows starting at t=0 (comma-separated, e.g. "-100,110")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub cash_flows: Vec<f64>,

    /// Starting rate for Newton-Raphson
    #[arg(long, default_value_t = DEFAULT_IRR_GUESS)]
    pub guess: f64,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate = irr(&args.cash_flows, args.guess);
    Ok(json!({
        "irr": rate,
        "npv_at_irr": npv(rate, &args.cash_flows),
    }))
}
