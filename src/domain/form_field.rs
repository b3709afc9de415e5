use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::fmt;

/// A form value as submitted.
///
/// `null` and absent keys are both `Missing`. A value of the wrong JSON type
/// is kept as `Invalid` instead of failing the whole body, so it can be
/// reported against its own field next to every other violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField<T> {
    Missing,
    Value(T),
    Invalid,
}

impl<T> Default for FormField<T> {
    fn default() -> Self {
        FormField::Missing
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for FormField<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if value.is_null() {
            return Ok(FormField::Missing);
        }

        Ok(serde_json::from_value(value).map_or(FormField::Invalid, FormField::Value))
    }
}

impl<T> From<T> for FormField<T> {
    fn from(value: T) -> Self {
        FormField::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for FormField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Value(value) => value.fmt(f),
            FormField::Missing => Ok(()),
            FormField::Invalid => f.write_str("<invalid>"),
        }
    }
}
