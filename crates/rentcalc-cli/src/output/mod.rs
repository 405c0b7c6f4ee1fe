pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Plain-text rendering of a scalar cell. Floats are cut to two decimals;
/// `null` is how undefined figures arrive and prints as "–".
pub(crate) fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => format!("{:.2}", f),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => "–".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Rows of an array of objects, the header taken from the first object.
pub(crate) fn object_rows(arr: &[Value]) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let Value::Object(first) = arr.first()? else {
        return None;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let rows = arr
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(h).map(format_cell).unwrap_or_default())
                .collect()
        })
        .collect();
    Some((headers, rows))
}
