mod email_address;
mod person_name;
mod phone_number;

pub use email_address::EmailAddress;
pub use person_name::PersonName;
pub use phone_number::PhoneNumber;

/// Reasons a user supplied value can be rejected.
///
/// The display strings are shown next to the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0}")]
    TooShort(&'static str),
    #[error("{0}")]
    Malformed(&'static str),
}
