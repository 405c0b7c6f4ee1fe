pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

use rentcalc_core::locale::parse_locale_number;

/// Read a typed snapshot from `--input <file>` or piped stdin, if either is given.
pub fn read_snapshot<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}

/// clap value parser for decimal-comma numbers ("250.000", "3,2").
pub fn locale_number(text: &str) -> Result<f64, String> {
    let value = parse_locale_number(text);
    if value.is_nan() {
        Err(format!("'{text}' is not a number"))
    } else {
        Ok(value)
    }
}
