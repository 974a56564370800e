use std::fmt;

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 4;

/// Outward code of a UK postcode ("SW1A", "M1", "EH10").
///
/// Always stored upper-case, without surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartialPostcode(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostcodeError {
    #[error("postcode is empty")]
    Empty,
    #[error("postcode must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },
    #[error("postcode may only contain letters and digits")]
    InvalidCharacters,
    #[error("postcode must start with a letter")]
    MustStartWithLetter,
}

impl PartialPostcode {
    pub fn parse(input: &str) -> Result<Self, PostcodeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PostcodeError::Empty);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PostcodeError::InvalidCharacters);
        }
        if !(MIN_LEN..=MAX_LEN).contains(&trimmed.len()) {
            return Err(PostcodeError::InvalidLength {
                min: MIN_LEN,
                max: MAX_LEN,
            });
        }
        if !trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(PostcodeError::MustStartWithLetter);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PartialPostcode {
    type Error = PostcodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PartialPostcode> for String {
    fn from(value: PartialPostcode) -> Self {
        value.0
    }
}

impl fmt::Display for PartialPostcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
