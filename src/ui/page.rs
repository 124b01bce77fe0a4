use std::time::Instant;

use uuid::Uuid;

use crate::client::ContactsClient;
use crate::model::Contact;

use super::{render_form, render_list, ContactForm, ContactList, SubmitError};

/// The whole contact management screen: form on top, list below
#[derive(Debug)]
pub struct ContactPage {
    client: ContactsClient,
    contacts: Vec<Contact>,
    pub form: ContactForm,
    pub list: ContactList,
}

impl ContactPage {
    pub fn new(client: ContactsClient) -> Self {
        Self {
            client,
            contacts: Vec::new(),
            form: ContactForm::new(),
            list: ContactList::new(),
        }
    }

    /// Contacts from the most recent successful fetch
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Re-fetch the full list. On failure the error is logged and the previous list is kept
    pub async fn refresh(&mut self) {
        match self.client.list().await {
            Ok(contacts) => self.contacts = contacts,
            Err(error) => tracing::error!(error.cause_chain = ?error, "Failed to fetch contacts"),
        }
    }

    /// Submit the form, then re-fetch the list once the contact was created
    pub async fn submit(&mut self, now: Instant) -> Result<(), SubmitError> {
        if let Err(error) = self.form.submit(&self.client, now).await {
            tracing::error!(error.cause_chain = ?error, "Failed to add contact");
            return Err(error);
        }
        self.refresh().await;
        Ok(())
    }

    /// Delete a contact, then re-fetch the list if the API accepted the delete
    pub async fn delete(&mut self, id: Uuid, now: Instant) {
        if self.list.delete(&self.client, id, now).await {
            self.refresh().await;
        }
    }

    pub fn render(&self, now: Instant) -> String {
        format!(
            concat!(
                r#"<div class="min-h-screen bg-gray-50"><div class="max-w-7xl mx-auto px-4 py-8 sm:px-6 lg:px-8">"#,
                r#"<div class="mb-8"><h1 class="text-gray-900 mb-2 text-2xl font-semibold">Contact Management</h1>"#,
                r#"<p class="text-gray-600">Add and manage your contacts</p></div>"#,
                r#"<div class="mb-12">{}</div><div>{}</div></div></div>"#,
            ),
            render_form(&self.form, now),
            render_list(&self.list, &self.contacts, now),
        )
    }
}
