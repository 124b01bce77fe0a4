use actix_web::dev::HttpServiceFactory;
use actix_web::error::JsonPayloadError;
use actix_web::{delete, get, post, web, HttpResponse, Responder};

use serde::{Deserialize, Deserializer};

use uuid::Uuid;

use crate::error::{ContactError, ContactResult, MessageBody};
use crate::model::NewContact;
use crate::repo::ContactStore;

const REQUIRED_FIELDS_MESSAGE: &str = "Name and phone are required";

/// JSON deserialization wrapper for parsing new contacts.
/// Every field is optional here so missing fields become validation errors, not parse errors
#[derive(Debug, Deserialize)]
pub struct NewContactBody {
    #[serde(default, deserialize_with = "scalar_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    email: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    phone: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    message: Option<String>,
}

/// Accept numbers and booleans where text is expected, storing their textual form
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    });
    Ok(value)
}

impl TryFrom<NewContactBody> for NewContact {
    type Error = ContactError;

    fn try_from(body: NewContactBody) -> ContactResult<Self> {
        let name = non_blank(body.name);
        let phone = non_blank(body.phone);

        match (name, phone) {
            (Some(name), Some(phone)) => Ok(Self {
                name,
                email: non_blank(body.email),
                phone,
                message: non_blank(body.message),
            }),
            _ => Err(ContactError::Validation(REQUIRED_FIELDS_MESSAGE.into())),
        }
    }
}

/// Trim a submitted value, treating blank strings as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Create endpoint for new contacts
#[tracing::instrument(name = "Create a new contact", skip(store))]
#[post("")]
async fn create(
    store: web::Data<dyn ContactStore>,
    body: web::Json<NewContactBody>,
) -> ContactResult<impl Responder> {
    let new_contact: NewContact = body.into_inner().try_into()?;

    let contact = store.insert(new_contact).await?;

    Ok(HttpResponse::Created().json(contact))
}

/// List endpoint, newest contacts first
#[tracing::instrument(name = "List contacts", skip(store))]
#[get("")]
async fn list(store: web::Data<dyn ContactStore>) -> ContactResult<impl Responder> {
    let contacts = store.list().await?;

    Ok(HttpResponse::Ok().json(contacts))
}

/// Delete endpoint. Unknown and malformed IDs are answered like successful deletes
#[tracing::instrument(name = "Delete a contact", skip(store))]
#[delete("/{id}")]
async fn remove(
    store: web::Data<dyn ContactStore>,
    path: web::Path<(String,)>,
) -> ContactResult<impl Responder> {
    let (id,) = path.into_inner();

    match id.parse::<Uuid>() {
        Ok(id) => {
            if !store.delete(id).await? {
                tracing::debug!("No contact with id {} to delete", id);
            }
        }
        Err(_) => tracing::debug!("Ignoring delete for malformed id \"{}\"", id),
    }

    Ok(HttpResponse::Ok().json(MessageBody {
        message: "Contact deleted successfully".into(),
    }))
}

/// Contacts API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api/contacts")
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            // A body that is not declared as JSON is treated as carrying no fields
            let message = match err {
                JsonPayloadError::ContentType => REQUIRED_FIELDS_MESSAGE.to_string(),
                err => err.to_string(),
            };
            ContactError::Validation(message).into()
        }))
        .service(create)
        .service(list)
        .service(remove)
}
