/// A multi-select form answer that needs at least one entry.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Selection(Vec<String>);

impl Selection {
    pub fn parse(values: Vec<String>, label: &str) -> Result<Selection, String> {
        if values.is_empty() {
            return Err(format!("Please select at least one {}", label));
        }

        Ok(Self(values))
    }
}

impl AsRef<[String]> for Selection {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}
