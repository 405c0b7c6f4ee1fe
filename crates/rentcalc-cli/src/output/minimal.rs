use serde_json::Value;

use super::format_cell;

/// Key output fields, most important first.
const PRIORITY_KEYS: [&str; 8] = [
    "irr_pct",
    "irr",
    "marginal_rate",
    "value",
    "monthly_payment",
    "total",
    "grade",
    "ending_balance",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known fields in the result and in its `metrics` and
/// `breakdown` sections, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Schedules: the last row is the answer
    let result_obj = match result_obj {
        Value::Array(arr) => arr.last().unwrap_or(result_obj),
        other => other,
    };

    let sections = [
        Some(result_obj),
        result_obj.get("metrics"),
        result_obj.get("breakdown"),
    ];

    for key in PRIORITY_KEYS {
        for section in sections.iter().flatten() {
            if let Some(val) = section.get(key) {
                if !val.is_null() {
                    println!("{}", format_cell(val));
                    return;
                }
            }
        }
    }

    if let Some((key, val)) = result_obj.as_object().and_then(|m| m.iter().next()) {
        println!("{}: {}", key, format_cell(val));
        return;
    }

    println!("{}", format_cell(result_obj));
}
