//! Node bindings for the rentcalc engine. Every function takes and returns
//! JSON strings so a JavaScript front end can hand over its form snapshot
//! as-is.

use napi::Result as NapiResult;
use napi_derive::napi;
use serde_json::json;

use rentcalc_core::analysis::{self, InvestmentInput};
use rentcalc_core::locale;
use rentcalc_core::purchase::closing_costs;
use rentcalc_core::purchase::mortgage;
use rentcalc_core::purchase::PurchaseInputs;
use rentcalc_core::rental::tax;
use rentcalc_core::time_value;
use rentcalc_core::validation;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_investment(input_json: String) -> NapiResult<String> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyze(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Returns `null` when the snapshot is complete, otherwise the first missing field.
#[napi]
pub fn validate_investment(input_json: String) -> NapiResult<Option<String>> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(validation::validate(&input).err().map(|e| e.to_string()))
}

// ---------------------------------------------------------------------------
// Purchase
// ---------------------------------------------------------------------------

#[napi]
pub fn closing_costs(purchase_json: String) -> NapiResult<String> {
    let input: PurchaseInputs = serde_json::from_str(&purchase_json).map_err(to_napi_error)?;
    let output = closing_costs::resolve_closing_costs(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(
    loan_amount: f64,
    annual_rate_pct: f64,
    years: u32,
) -> NapiResult<String> {
    let years = years.max(1);
    let months = years
        .checked_mul(12)
        .ok_or_else(|| to_napi_error("years is too large"))?;
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let schedule = mortgage::amortization_schedule(loan_amount, monthly_rate, months, years);
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rental and returns
// ---------------------------------------------------------------------------

#[napi]
pub fn marginal_rate(base: f64) -> f64 {
    tax::marginal_rate(base)
}

#[napi]
pub fn internal_rate_of_return(cash_flows_json: String, guess: Option<f64>) -> NapiResult<String> {
    let flows: Vec<f64> = serde_json::from_str(&cash_flows_json).map_err(to_napi_error)?;
    let rate = time_value::irr(&flows, guess.unwrap_or(time_value::DEFAULT_IRR_GUESS));
    let out = json!({ "irr": rate, "npv_at_irr": time_value::npv(rate, &flows) });
    Ok(out.to_string())
}

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// `NaN` for text that is not a number, like an empty form field.
#[napi]
pub fn parse_locale_number(text: String) -> f64 {
    locale::parse_locale_number(&text)
}

#[napi]
pub fn format_for_editing(value: f64) -> String {
    locale::format_for_editing(value)
}
