use crate::domain::form_field::FormField;

pub const INVALID_VALUE: &str = "Invalid value";

/// A single violated constraint, addressed by the JSON path of the field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    pub path: Vec<String>,
    pub message: String,
}

/// Collects every field error of a request body instead of stopping at the first one.
#[derive(Debug, Default, thiserror::Error)]
#[error("Validation failed")]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the parsed value, or records its message against `field`.
    pub fn check<T>(&mut self, field: &str, parsed: Result<T, String>) -> Option<T> {
        match parsed {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }

    /// Parses a submitted value. A missing one is parsed as empty so the
    /// parser reports it as required.
    pub fn parse_field<T, U>(
        &mut self,
        field: &str,
        value: FormField<T>,
        parse: impl FnOnce(T) -> Result<U, String>,
    ) -> Option<U>
    where
        T: Default,
    {
        match value {
            FormField::Value(value) => self.check(field, parse(value)),
            FormField::Missing => self.check(field, parse(T::default())),
            FormField::Invalid => {
                self.push(field, INVALID_VALUE);
                None
            }
        }
    }

    /// Optional text, where blank counts as absent.
    pub fn optional_field(&mut self, field: &str, value: FormField<String>) -> Option<String> {
        match value {
            FormField::Value(value) => optional_text(Some(value)),
            FormField::Missing => None,
            FormField::Invalid => {
                self.push(field, INVALID_VALUE);
                None
            }
        }
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            path: vec![field.to_string()],
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn details(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_details(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

/// Optional fields submitted as empty strings are treated as absent.
fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
