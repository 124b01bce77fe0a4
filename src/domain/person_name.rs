use std::fmt;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

use super::ParseError;

const MIN_LEN: usize = 2;

/// A contact's display name, at least two characters once trimmed
#[derive(Debug, PartialEq, Clone)]
pub struct PersonName(String);

impl FromStr for PersonName {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ParseError::Required("Name"));
        }
        if value.graphemes(true).count() < MIN_LEN {
            return Err(ParseError::TooShort("Name must be at least 2 characters"));
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
