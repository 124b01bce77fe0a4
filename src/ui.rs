//! Contact form and list components.
//!
//! Components hold fetched data plus transient flags (touched fields, expanded
//! messages, notices). Rendering is a pure function of that state and the
//! current instant, producing an HTML string.

mod form;
mod list;
mod page;

use std::time::{Duration, Instant};

pub use form::{render_form, ContactForm, Field, SubmitError, ValidContact};
pub use list::{render_list, ContactList, MessageView, TRUNCATE_AT};
pub use page::ContactPage;

/// How long a success or failure notice stays on screen
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A transient banner raised after a user action
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    shown_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
            shown_at: now,
        }
    }

    pub fn failure(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Failure,
            shown_at: now,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < NOTICE_DURATION
    }
}

/// Escape text for interpolation into HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
