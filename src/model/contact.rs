use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

/// New Contact request, already checked for its required fields
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub message: Option<String>,
}

/// Stored Contact record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// ID of the contact, assigned by the store
    pub id: Uuid,
    /// User supplied data
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub message: Option<String>,
    /// Creation timestamp, the listing sort key
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Build the record a store persists for a new contact
    pub fn create(new_contact: NewContact, created_at: DateTime<Utc>) -> Self {
        let NewContact {
            name,
            email,
            phone,
            message,
        } = new_contact;

        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            message,
            created_at,
        }
    }
}
