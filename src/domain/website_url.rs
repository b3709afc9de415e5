use validator::validate_url;

#[derive(Debug, Clone, serde::Serialize)]
pub struct WebsiteUrl(String);

impl WebsiteUrl {
    pub fn parse(url: String) -> Result<WebsiteUrl, String> {
        if !validate_url(&url) {
            return Err(String::from("Please enter a valid URL"));
        }

        Ok(Self(url))
    }
}

impl AsRef<str> for WebsiteUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
