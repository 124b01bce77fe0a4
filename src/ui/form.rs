use std::collections::HashSet;
use std::fmt::Write;
use std::time::Instant;

use crate::client::{ClientError, ContactsClient, NewContactRequest};
use crate::domain::{EmailAddress, ParseError, PersonName, PhoneNumber};
use crate::model::Contact;

use super::{escape, Notice};

const SUCCESS_TEXT: &str = "Contact successfully added to the list below";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Message];

    /// Form control id and name
    pub fn id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Message => "message",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Form has invalid fields")]
    Invalid,
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Form values that passed every field rule
#[derive(Debug, Clone, PartialEq)]
pub struct ValidContact {
    pub name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: PhoneNumber,
    pub message: Option<String>,
}

impl ValidContact {
    pub fn as_request(&self) -> NewContactRequest<'_> {
        NewContactRequest {
            name: self.name.as_ref(),
            email: self.email.as_ref().map(|email| email.as_ref()),
            phone: self.phone.as_ref(),
            message: self.message.as_deref(),
        }
    }
}

/// State of the "Add New Contact" form
#[derive(Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    message: String,
    touched: HashSet<Field>,
    notice: Option<Notice>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record user input; errors for a field are only shown once it has been edited
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
        }
        self.touched.insert(field);
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    /// The rule the current value of `field` breaks, if any
    pub fn error(&self, field: Field) -> Option<ParseError> {
        match field {
            Field::Name => self.name.parse::<PersonName>().err(),
            Field::Email if self.email.is_empty() => None,
            Field::Email => self.email.parse::<EmailAddress>().err(),
            Field::Phone => self.phone.parse::<PhoneNumber>().err(),
            Field::Message => None,
        }
    }

    /// Like `error`, but silent for fields the user has not edited yet
    pub fn visible_error(&self, field: Field) -> Option<ParseError> {
        if self.touched.contains(&field) {
            self.error(field)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Option<ValidContact> {
        let name = self.name.parse().ok()?;
        let phone = self.phone.parse().ok()?;
        let email = match self.email.as_str() {
            "" => None,
            email => Some(email.parse().ok()?),
        };
        let message = match self.message.trim() {
            "" => None,
            message => Some(message.to_string()),
        };

        Some(ValidContact {
            name,
            email,
            phone,
            message,
        })
    }

    /// Submission is only enabled while this holds
    pub fn is_valid(&self) -> bool {
        self.validate().is_some()
    }

    /// Send the form to the API. On success the fields are cleared and a success notice is raised
    #[tracing::instrument(name = "Submit contact form", skip(self, client))]
    pub async fn submit(
        &mut self,
        client: &ContactsClient,
        now: Instant,
    ) -> Result<Contact, SubmitError> {
        let valid = self.validate().ok_or(SubmitError::Invalid)?;

        let contact = client.create(&valid.as_request()).await?;

        self.reset();
        self.notice = Some(Notice::success(SUCCESS_TEXT, now));
        Ok(contact)
    }

    /// Clear every field and forget which ones were edited
    pub fn reset(&mut self) {
        let notice = self.notice.take();
        *self = Self {
            notice,
            ..Self::default()
        };
    }

    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_visible_at(now))
    }
}

fn input_class(has_error: bool) -> &'static str {
    if has_error {
        "w-full px-3 py-2 border rounded-md border-red-300"
    } else {
        "w-full px-3 py-2 border rounded-md border-gray-300"
    }
}

fn render_field(out: &mut String, form: &ContactForm, field: Field) {
    let (label, required, input_type, placeholder) = match field {
        Field::Name => ("Name", true, "text", "Pratham Chaudhari"),
        Field::Email => ("Email", false, "email", "john@example.com"),
        Field::Phone => ("Phone", true, "tel", "9846578384"),
        Field::Message => ("Message", false, "", "Optional message"),
    };
    let id = field.id();
    let error = form.visible_error(field);
    let value = escape(form.value(field));

    out.push_str("<div>");
    let _ = write!(out, r#"<label for="{id}" class="block text-gray-700 mb-2">{label}"#);
    if required {
        out.push_str(r#" <span class="text-red-500">*</span>"#);
    }
    out.push_str("</label>");

    let class = input_class(error.is_some());
    if field == Field::Message {
        let _ = write!(
            out,
            r#"<textarea id="{id}" name="{id}" rows="1" class="{class}" placeholder="{placeholder}">{value}</textarea>"#
        );
    } else {
        let _ = write!(
            out,
            r#"<input id="{id}" name="{id}" type="{input_type}" class="{class}" placeholder="{placeholder}" value="{value}">"#
        );
    }

    if let Some(error) = error {
        let _ = write!(
            out,
            r#"<p class="mt-1 text-red-600 text-sm">{}</p>"#,
            escape(&error.to_string())
        );
    }
    out.push_str("</div>");
}

/// Render the form with its current values, visible errors, and submit state
pub fn render_form(form: &ContactForm, now: Instant) -> String {
    let mut out = String::new();
    out.push_str(r#"<div class="bg-white rounded-lg border border-gray-200 p-6 shadow-sm">"#);
    out.push_str(r#"<h2 class="text-gray-900 mb-6 text-lg font-semibold">Add New Contact</h2>"#);
    out.push_str(r#"<form class="space-y-5"><div class="grid grid-cols-1 md:grid-cols-2 gap-5">"#);
    for field in Field::ALL {
        render_field(&mut out, form, field);
    }
    out.push_str("</div>");

    let notice = form.notice(now);
    let (button_class, disabled) = match (form.is_valid(), notice.is_some()) {
        (false, _) => ("bg-gray-300 text-gray-500 cursor-not-allowed", " disabled"),
        (true, true) => ("bg-green-600 text-white", ""),
        (true, false) => ("bg-blue-600 text-white", ""),
    };
    let label = if notice.is_some() {
        "Contact Added!"
    } else {
        "Add Contact"
    };
    let _ = write!(
        out,
        r#"<div class="flex items-center gap-3 pt-2"><button type="submit" class="px-6 py-2.5 rounded-md {button_class}"{disabled}>{label}</button>"#
    );
    if let Some(notice) = notice {
        let _ = write!(
            out,
            r#"<span class="text-green-600 text-md">{}</span>"#,
            escape(&notice.text)
        );
    }
    out.push_str("</div></form></div>");
    out
}
