use validator::validate_email;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ApplicantEmail(String);

impl ApplicantEmail {
    pub fn parse(email: String) -> Result<ApplicantEmail, String> {
        let is_valid_email = validate_email(&email);

        if !is_valid_email {
            return Err(String::from("Please enter a valid email address"));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for ApplicantEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
