mod contacts_client;

pub use contacts_client::{ClientError, ClientResult, ContactsClient, NewContactRequest, API_BASE_URL};
