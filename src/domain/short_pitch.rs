use unicode_segmentation::UnicodeSegmentation;

pub const MIN_PITCH_LENGTH: usize = 10;
pub const MAX_PITCH_LENGTH: usize = 300;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ShortPitch(String);

impl ShortPitch {
    pub fn parse(pitch: String) -> Result<ShortPitch, String> {
        let length = pitch.graphemes(true).count();

        if length < MIN_PITCH_LENGTH {
            return Err(format!(
                "Pitch must be at least {} characters",
                MIN_PITCH_LENGTH
            ));
        }

        if length > MAX_PITCH_LENGTH {
            return Err(format!(
                "Pitch must be at most {} characters",
                MAX_PITCH_LENGTH
            ));
        }

        Ok(Self(pitch))
    }
}

impl AsRef<str> for ShortPitch {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
