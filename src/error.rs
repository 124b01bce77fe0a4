use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde::{Deserialize, Serialize};

use thiserror::Error;

pub type ContactResult<T> = Result<T, ContactError>;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),

    /// Database failures, surfaced to the caller with the driver's message
    #[error("{0}")]
    Persistence(#[from] sqlx::Error),
}

/// JSON body carried by every error response, and by the delete confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Persistence(e) = self {
            tracing::error!(error.cause_chain = ?e, "Contact store operation failed");
        }
        HttpResponse::build(self.status_code()).json(MessageBody {
            message: self.to_string(),
        })
    }
}
