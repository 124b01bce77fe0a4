use std::time::Duration;

use anyhow::Context;

use reqwest::{Client, Response, StatusCode};

use serde::Serialize;

use url::Url;

use uuid::Uuid;

use crate::error::MessageBody;
use crate::model::Contact;

/// API base URL baked in at build time from `CONTACTS_API_URL`
pub const API_BASE_URL: &str = match option_env!("CONTACTS_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to reach the contacts API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Contacts API answered {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to build contacts API URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Body of a create request; absent optionals are left out of the JSON
#[derive(Debug, Serialize)]
pub struct NewContactRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    pub phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

/// Typed client for the `/api/contacts` REST surface
#[derive(Debug, Clone)]
pub struct ContactsClient {
    client: Client,
    api_base_url: Url,
}

impl ContactsClient {
    pub fn new(api_base_url: Url, api_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        // Joining relative paths onto a base without a trailing slash would drop its last segment
        let mut api_base_url = api_base_url;
        if !api_base_url.path().ends_with('/') {
            let path = format!("{}/", api_base_url.path());
            api_base_url.set_path(&path);
        }

        Ok(Self {
            client,
            api_base_url,
        })
    }

    /// Client for the API URL this crate was built against
    pub fn from_build_env() -> anyhow::Result<Self> {
        let api_base_url = Url::parse(API_BASE_URL).context("Failed to parse API base URL")?;
        Self::new(api_base_url, DEFAULT_TIMEOUT)
    }

    #[tracing::instrument(name = "Create contact via API", skip(self))]
    pub async fn create(&self, new_contact: &NewContactRequest<'_>) -> ClientResult<Contact> {
        let url = self.api_base_url.join("api/contacts")?;

        let res = self.client.post(url).json(new_contact).send().await?;
        let contact = check_status(res).await?.json().await?;
        Ok(contact)
    }

    #[tracing::instrument(name = "List contacts via API", skip(self))]
    pub async fn list(&self) -> ClientResult<Vec<Contact>> {
        let url = self.api_base_url.join("api/contacts")?;

        let res = self.client.get(url).send().await?;
        let contacts = check_status(res).await?.json().await?;
        Ok(contacts)
    }

    #[tracing::instrument(name = "Delete contact via API", skip(self))]
    pub async fn delete(&self, id: Uuid) -> ClientResult<()> {
        let url = self.api_base_url.join(&format!("api/contacts/{}", id))?;

        let res = self.client.delete(url).send().await?;
        check_status(res).await?;
        Ok(())
    }
}

/// Turn non-2xx responses into `ClientError::Api`, keeping the server's message when it sent one
async fn check_status(res: Response) -> ClientResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = match res.json::<MessageBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    Err(ClientError::Api { status, message })
}
