use std::collections::HashMap;

use uuid::Uuid;

use chrono::Utc;

use sqlx::PgPool;

use tokio::sync::RwLock;

use crate::model::{Contact, NewContact};

/// Contact repository trait, implemented once per storage backend.
/// NOTE: The service only holds a `dyn ContactStore`, so tests can swap the backend
#[async_trait::async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a new contact, assigning its ID and creation timestamp
    async fn insert(&self, new_contact: NewContact) -> sqlx::Result<Contact>;

    /// Fetch every contact, newest first
    async fn list(&self) -> sqlx::Result<Vec<Contact>>;

    /// Remove a contact by ID, returning whether a record was removed
    async fn delete(&self, id: Uuid) -> sqlx::Result<bool>;
}

/// Postgres Contact Repository
#[derive(Debug, Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ContactStore for PgContactStore {
    #[tracing::instrument(name = "Insert contact", skip(self))]
    async fn insert(&self, new_contact: NewContact) -> sqlx::Result<Contact> {
        let contact = Contact::create(new_contact, Utc::now());

        // Read the row back so the timestamp carries the database's precision
        sqlx::query_as::<_, Contact>(
            "insert into contacts(id, name, email, phone, message, created_at) \
             values ($1, $2, $3, $4, $5, $6) \
             returning id, name, email, phone, message, created_at",
        )
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .bind(contact.created_at)
        .fetch_one(&self.pool)
        .await
    }

    #[tracing::instrument(name = "Fetch all contacts", skip(self))]
    async fn list(&self) -> sqlx::Result<Vec<Contact>> {
        sqlx::query_as::<_, Contact>(
            "select id, name, email, phone, message, created_at from contacts \
             order by created_at desc",
        )
        .fetch_all(&self.pool)
        .await
    }

    #[tracing::instrument(name = "Delete contact by id", skip(self))]
    async fn delete(&self, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("delete from contacts where id=$1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug)]
struct StoredContact {
    seq: u64,
    contact: Contact,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_seq: u64,
    records: HashMap<Uuid, StoredContact>,
}

/// In-process Contact Repository, keyed by contact ID
#[derive(Debug, Default)]
pub struct MemoryContactStore {
    state: RwLock<MemoryState>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ContactStore for MemoryContactStore {
    #[tracing::instrument(name = "Insert contact", skip(self))]
    async fn insert(&self, new_contact: NewContact) -> sqlx::Result<Contact> {
        let contact = Contact::create(new_contact, Utc::now());

        let mut state = self.state.write().await;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.records.insert(
            contact.id,
            StoredContact {
                seq,
                contact: contact.clone(),
            },
        );

        Ok(contact)
    }

    #[tracing::instrument(name = "Fetch all contacts", skip(self))]
    async fn list(&self) -> sqlx::Result<Vec<Contact>> {
        let state = self.state.read().await;

        let mut stored: Vec<&StoredContact> = state.records.values().collect();
        // Equal timestamps fall back to insertion order, later first
        stored.sort_by(|a, b| {
            b.contact
                .created_at
                .cmp(&a.contact.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(stored.into_iter().map(|s| s.contact.clone()).collect())
    }

    #[tracing::instrument(name = "Delete contact by id", skip(self))]
    async fn delete(&self, id: Uuid) -> sqlx::Result<bool> {
        let removed = self.state.write().await.records.remove(&id);
        Ok(removed.is_some())
    }
}
