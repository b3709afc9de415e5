use unicode_segmentation::UnicodeSegmentation;

const MAX_CHAR_LENGTH: usize = 256;

#[derive(Debug, Clone, serde::Serialize)]
pub struct PersonName(String);

impl PersonName {
    /// `label` names the field in the error message, e.g. "Full name".
    pub fn parse(name: String, label: &str) -> Result<PersonName, String> {
        if name.trim().is_empty() {
            return Err(format!("{} is required", label));
        }

        if name.graphemes(true).count() > MAX_CHAR_LENGTH {
            return Err(format!(
                "{} must be at most {} characters",
                label, MAX_CHAR_LENGTH
            ));
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
