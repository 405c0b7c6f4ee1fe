use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{lenient_number, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    Auto,
    Manual,
}

/// A value that follows a derivation rule until the user edits it.
///
/// Starts in [`FieldMode::Auto`]; [`derive`](Self::derive) only writes while
/// in that mode. The first [`set`](Self::set) moves it to
/// [`FieldMode::Manual`] for good.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoField {
    value: Money,
    mode: FieldMode,
}

impl AutoField {
    pub fn auto() -> Self {
        Self {
            value: f64::NAN,
            mode: FieldMode::Auto,
        }
    }

    pub fn manual(value: Money) -> Self {
        Self {
            value,
            mode: FieldMode::Manual,
        }
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn is_touched(&self) -> bool {
        self.mode == FieldMode::Manual
    }

    /// External write. The field stops following its derivation rule.
    pub fn set(&mut self, value: Money) {
        self.value = value;
        self.mode = FieldMode::Manual;
    }

    /// Derived write. Ignored once the user has touched the field.
    pub fn derive(&mut self, value: Money) {
        if self.mode == FieldMode::Auto {
            self.value = value;
        }
    }
}

impl Default for AutoField {
    fn default() -> Self {
        Self::auto()
    }
}

impl Serialize for AutoField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

/// A number in the input snapshot counts as a user edit; `null` leaves the
/// field on auto.
impl<'de> Deserialize<'de> for AutoField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = lenient_number(deserializer)?;
        Ok(if value.is_nan() {
            AutoField::auto()
        } else {
            AutoField::manual(value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_writes_while_auto() {
        let mut field = AutoField::auto();
        field.derive(720.0);
        assert_eq!(field.value(), 720.0);
        field.derive(780.0);
        assert_eq!(field.value(), 780.0);
        assert_eq!(field.mode(), FieldMode::Auto);
    }

    #[test]
    fn test_set_is_permanent() {
        let mut field = AutoField::auto();
        field.derive(720.0);
        field.set(500.0);
        field.derive(900.0);
        assert_eq!(field.value(), 500.0);
        assert!(field.is_touched());

        // Writing NaN is still a user edit.
        field.set(f64::NAN);
        field.derive(900.0);
        assert!(field.value().is_nan());
        assert!(field.is_touched());
    }

    #[test]
    fn test_deserialize_number_means_manual() {
        let field: AutoField = serde_json::from_str("450").unwrap();
        assert_eq!(field, AutoField::manual(450.0));

        let field: AutoField = serde_json::from_str("null").unwrap();
        assert_eq!(field.mode(), FieldMode::Auto);
    }
}
