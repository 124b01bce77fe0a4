use std::collections::HashSet;
use std::fmt::Write;
use std::time::Instant;

use uuid::Uuid;

use crate::client::ContactsClient;
use crate::model::Contact;

use super::{escape, Notice, NoticeKind};

/// Messages longer than this many characters are collapsed behind a toggle
pub const TRUNCATE_AT: usize = 70;

const PLACEHOLDER: &str = "—";

/// How a contact's message is presented given the list's expansion state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageView<'a> {
    /// Short enough (or absent) to show as is
    Full(&'a str),
    Collapsed { preview: String },
    Expanded { full: &'a str },
}

/// State of the contact list: which messages are expanded and the last delete notice
#[derive(Debug, Default)]
pub struct ContactList {
    expanded: HashSet<Uuid>,
    notice: Option<Notice>,
}

impl ContactList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a contact's message between collapsed and expanded
    pub fn toggle(&mut self, id: Uuid) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: Uuid) -> bool {
        self.expanded.contains(&id)
    }

    pub fn message_view<'a>(&self, contact: &'a Contact) -> MessageView<'a> {
        let message = contact.message.as_deref().unwrap_or(PLACEHOLDER);
        if message.chars().count() <= TRUNCATE_AT {
            MessageView::Full(message)
        } else if self.is_expanded(contact.id) {
            MessageView::Expanded { full: message }
        } else {
            let preview = message.chars().take(TRUNCATE_AT).collect::<String>() + "...";
            MessageView::Collapsed { preview }
        }
    }

    /// Ask the API to delete a contact and raise the matching notice.
    /// Returns whether the caller should re-fetch the list
    #[tracing::instrument(name = "Delete contact from list", skip(self, client))]
    pub async fn delete(&mut self, client: &ContactsClient, id: Uuid, now: Instant) -> bool {
        match client.delete(id).await {
            Ok(()) => {
                self.notice = Some(Notice::success("Contact deleted successfully!", now));
                true
            }
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "Delete failed");
                self.notice = Some(Notice::failure("Failed to delete contact", now));
                false
            }
        }
    }

    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_visible_at(now))
    }
}

fn render_message(out: &mut String, list: &ContactList, contact: &Contact) {
    let (text, toggle) = match list.message_view(contact) {
        MessageView::Full(text) => {
            out.push_str(&escape(text));
            return;
        }
        MessageView::Collapsed { preview } => (escape(&preview), "Read more"),
        MessageView::Expanded { full } => (escape(full), "Read less"),
    };
    let _ = write!(
        out,
        r#"<span>{text} <button class="text-blue-600 hover:underline text-sm ml-1" data-toggle="{}">{toggle}</button></span>"#,
        contact.id
    );
}

fn delete_button(out: &mut String, id: Uuid, label: bool) {
    let _ = write!(
        out,
        r#"<button class="inline-flex items-center gap-1.5 text-red-600" data-delete="{id}" aria-label="Delete contact">"#
    );
    if label {
        out.push_str(r#"<span class="text-sm">Delete</span>"#);
    }
    out.push_str("</button>");
}

fn render_table(out: &mut String, list: &ContactList, contacts: &[Contact]) {
    out.push_str(r#"<div class="hidden md:block overflow-x-auto"><table class="w-full">"#);
    out.push_str(r#"<thead class="bg-gray-50 border-b border-gray-200"><tr>"#);
    for heading in ["Name", "Email", "Phone", "Message"] {
        let _ = write!(out, r#"<th class="px-6 py-3 text-left text-gray-700">{heading}</th>"#);
    }
    out.push_str(r#"<th class="px-6 py-3 text-right text-gray-700">Actions</th></tr></thead>"#);

    out.push_str(r#"<tbody class="divide-y divide-gray-200">"#);
    for contact in contacts {
        let _ = write!(
            out,
            r#"<tr data-id="{}"><td class="px-6 py-4 text-gray-900">{}</td><td class="px-6 py-4 text-gray-600">{}</td><td class="px-6 py-4 text-gray-600">{}</td><td class="px-6 py-4 text-gray-600">"#,
            contact.id,
            escape(&contact.name),
            escape(contact.email.as_deref().unwrap_or(PLACEHOLDER)),
            escape(&contact.phone),
        );
        render_message(out, list, contact);
        out.push_str(r#"</td><td class="px-6 py-4 text-right">"#);
        delete_button(out, contact.id, true);
        out.push_str("</td></tr>");
    }
    out.push_str("</tbody></table></div>");
}

fn render_cards(out: &mut String, list: &ContactList, contacts: &[Contact]) {
    out.push_str(r#"<div class="md:hidden divide-y divide-gray-200">"#);
    for contact in contacts {
        let _ = write!(
            out,
            r#"<div class="p-4" data-id="{}"><div class="flex items-start justify-between mb-3"><div><h3 class="text-gray-900 mb-1">{}</h3><p class="text-gray-600 text-sm">{}</p></div>"#,
            contact.id,
            escape(&contact.name),
            escape(&contact.phone),
        );
        delete_button(out, contact.id, false);
        out.push_str("</div>");

        // Cards leave out absent fields instead of showing a placeholder
        if let Some(email) = &contact.email {
            let _ = write!(out, r#"<p class="text-gray-600 text-sm mb-2">{}</p>"#, escape(email));
        }
        if contact.message.is_some() {
            out.push_str(r#"<p class="text-gray-500 text-sm">"#);
            render_message(out, list, contact);
            out.push_str("</p>");
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

/// Render every contact as a table for wide viewports and as cards for narrow ones
pub fn render_list(list: &ContactList, contacts: &[Contact], now: Instant) -> String {
    let mut out = String::new();
    if contacts.is_empty() {
        out.push_str(r#"<div class="bg-white rounded-lg border border-gray-200 p-12 text-center shadow-sm"><p class="text-gray-500">No contacts yet. Add your first contact using the form above.</p></div>"#);
        return out;
    }

    out.push_str(r#"<div class="bg-white rounded-lg border border-gray-200 shadow-sm overflow-hidden">"#);
    let _ = write!(
        out,
        r#"<div class="px-6 py-4 border-b border-gray-200 flex justify-between items-center"><h2 class="text-gray-900">Contacts ({})</h2>"#,
        contacts.len()
    );
    if let Some(notice) = list.notice(now) {
        let class = match notice.kind {
            NoticeKind::Success => "text-green-600 text-sm",
            NoticeKind::Failure => "text-red-600 text-sm",
        };
        let _ = write!(out, r#"<span class="{class}">{}</span>"#, escape(&notice.text));
    }
    out.push_str("</div>");

    render_table(&mut out, list, contacts);
    render_cards(&mut out, list, contacts);
    out.push_str("</div>");
    out
}
