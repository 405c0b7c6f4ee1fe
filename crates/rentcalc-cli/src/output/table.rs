use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_cell, object_rows};

/// Format output as tables using the tabled crate.
///
/// Scalars of the result go into a Field/Value table; nested objects are
/// flattened with dotted keys and arrays of rows (amortization, projection)
/// each get a table of their own.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result(result, map),
            _ => print_sections(map),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", format_cell(value)),
    }
}

fn print_result(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    print_sections(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_sections(map: &Map<String, Value>) {
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut row_sets: Vec<(&str, &Vec<Value>)> = Vec::new();
    flatten("", map, &mut fields, &mut row_sets);

    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &fields {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, rows) in row_sets {
        println!("\n{}:", name);
        print_rows(rows);
    }
}

fn flatten<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    fields: &mut Vec<(String, String)>,
    row_sets: &mut Vec<(&'a str, &'a Vec<Value>)>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => flatten(&name, inner, fields, row_sets),
            Value::Array(arr) if arr.first().is_some_and(Value::is_object) => {
                row_sets.push((key.as_str(), arr))
            }
            _ => fields.push((name, format_cell(val))),
        }
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    match object_rows(arr) {
        Some((headers, rows)) => {
            let mut builder = Builder::default();
            builder.push_record(headers);
            for row in rows {
                builder.push_record(row);
            }
            println!("{}", Table::from(builder));
        }
        None => {
            for item in arr {
                println!("{}", format_cell(item));
            }
        }
    }
}
