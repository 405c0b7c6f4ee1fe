use serde::{Deserialize, Deserializer, Serialize};

use crate::locale::parse_locale_number;

/// Currency amounts. Missing or invalid values are carried as `f64::NAN`.
pub type Money = f64;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = f64;

/// Percentages as entered by the user (5.0 = 5%).
pub type Percent = f64;

/// Default for numeric input fields the user has not filled in.
pub fn missing() -> f64 {
    f64::NAN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number, `null`, or decimal-comma text such as `"250.000"`.
///
/// `null` and unparseable text become `NaN`, the same sentinel an empty form
/// field produces.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<LenientNumber> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(LenientNumber::Number(n)) => n,
        Some(LenientNumber::Text(s)) => parse_locale_number(&s),
        None => f64::NAN,
    })
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64".to_string(),
        },
    }
}
