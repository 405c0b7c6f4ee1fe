use clap::Args;
use serde_json::{json, Value};

use rentcalc_core::locale::{format_currency, format_for_editing, parse_locale_number};

/// Arguments for decimal-comma parsing
#[derive(Args)]
pub struct ParseNumberArgs {
    /// Text as typed in a form field, e.g. "1.234.567,89"
    #[arg(allow_hyphen_values = true)]
    pub text: String,
}

pub fn run_parse_number(args: ParseNumberArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let value = parse_locale_number(&args.text);
    if value.is_nan() {
        return Err(format!("'{}' is not a number", args.text).into());
    }
    Ok(json!({
        "value": value,
        "editing_text": format_for_editing(value),
        "currency": format_currency(value),
    }))
}
