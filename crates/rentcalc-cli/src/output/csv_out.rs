use serde_json::Value;
use std::io;

use super::{format_cell, object_rows};

/// Write output as CSV to stdout.
///
/// An analysis writes its yearly projection; schedules write one row per
/// year; anything else becomes a two-column field,value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let rows = match value {
        Value::Array(arr) => Some(arr),
        Value::Object(map) => map
            .get("result")
            .and_then(|r| r.get("projection"))
            .and_then(Value::as_array),
        _ => None,
    };

    match (rows, value) {
        (Some(arr), _) => write_rows(&mut wtr, arr),
        (None, Value::Object(map)) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in fields {
                let _ = wtr.write_record([key.as_str(), &csv_value(val)]);
            }
        }
        (None, _) => {
            let _ = wtr.write_record([csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    match object_rows(arr) {
        Some((headers, rows)) => {
            let _ = wtr.write_record(&headers);
            for row in rows {
                let _ = wtr.write_record(&row);
            }
        }
        None => {
            for item in arr {
                let _ = wtr.write_record([csv_value(item)]);
            }
        }
    }
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        _ => format_cell(value),
    }
}
