#[derive(Debug, Clone, serde::Serialize)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn parse(value: String, label: &str) -> Result<RequiredText, String> {
        if value.trim().is_empty() {
            return Err(format!("{} is required", label));
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
