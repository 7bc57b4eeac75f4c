//! Request contract with the remote CRUD API.
//!
//! The engine only speaks [`ApiRequest`]/[`ApiResponse`] through the
//! [`Transport`] seam; [`http::HttpTransport`] carries them over HTTP.

use std::fmt::{Debug, Display, Formatter};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::forms::Draft;
use crate::query::Queryable;

pub mod http;
pub mod resources;

/// HTTP verbs used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the API base URL, e.g. `/api/clientes/5`.
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request never produced a response.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Sends one request and resolves with whatever the server answered.
///
/// Futures are polled on a single-threaded runtime and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// An entity type exposed as a REST collection.
pub trait Resource: Queryable + Clone + Debug + DeserializeOwned {
    type Id: Copy + Eq + Display + Debug;
    type Draft: Draft<Entity = Self>;

    /// Collection path, e.g. `/api/clientes`.
    const COLLECTION_PATH: &'static str;
    /// Singular noun used in log lines.
    const NAME: &'static str;

    fn id(&self) -> Self::Id;

    /// Question put to the user before deleting this entity.
    fn delete_prompt(&self) -> String;

    fn member_path(id: Self::Id) -> String {
        format!("{}/{}", Self::COLLECTION_PATH, id)
    }
}

/// Serializes a draft payload for a request body.
pub fn to_body<P: Serialize>(payload: &P) -> Result<Value, serde_json::Error> {
    serde_json::to_value(payload)
}
