use std::fmt;
use std::str::FromStr;

use super::ParseError;

const DIGITS: usize = 10;

/// A phone number made of exactly ten ASCII digits
#[derive(Debug, PartialEq, Clone)]
pub struct PhoneNumber(String);

impl FromStr for PhoneNumber {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(ParseError::Required("Phone"));
        }
        // Length is checked before format so short input gets the more helpful message
        if value.chars().count() < DIGITS {
            return Err(ParseError::TooShort(
                "Phone number must be exactly 10 digits",
            ));
        }
        if value.len() != DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::Malformed("Invalid phone number"));
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
