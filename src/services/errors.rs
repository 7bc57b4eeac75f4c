use thiserror::Error;

use crate::api::TransportError;
use crate::forms::{FormError, ValidationError};

/// A collection load did not complete. The store keeps its previous contents.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Malformed collection: {0}")]
    Decode(String),
}

/// A create, update or delete was not accepted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WriteError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Rejected with status {0}")]
    Rejected(u16),

    #[error("Could not encode payload: {0}")]
    Encode(String),
}

/// Failures surfaced by the sync controller to the rendering layer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    #[error("Write failed: {0}")]
    Write(#[from] WriteError),

    #[error("Form error: {0}")]
    Form(FormError),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
