use serde::Serialize;
use validator::Validate;

use crate::domain::client::Client;
use crate::domain::types::{ClientStatus, NonEmptyString};
use crate::forms::{Draft, ValidationError};

#[derive(Clone, Debug, Default, PartialEq, Validate)]
/// Form data for creating or updating a client.
pub struct ClientDraft {
    /// Company name.
    pub company: String,
    /// Contact person.
    pub contact_name: String,
    /// Contact email address.
    #[validate(email)]
    pub email: String,
    /// Optional phone number; blank means none.
    pub phone: String,
    pub status: ClientStatus,
}

/// Request body for `POST /api/clientes` and `PUT /api/clientes/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ClientPayload {
    #[serde(rename = "empresa")]
    pub company: NonEmptyString,
    #[serde(rename = "nombre_contacto")]
    pub contact_name: NonEmptyString,
    /// Sent as typed, apart from surrounding whitespace.
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "estado")]
    pub status: ClientStatus,
}

impl Draft for ClientDraft {
    type Entity = Client;
    type Payload = ClientPayload;

    fn from_entity(client: &Client) -> Self {
        Self {
            company: client.company.clone(),
            contact_name: client.contact_name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone().unwrap_or_default(),
            status: client.status,
        }
    }

    fn to_payload(&self) -> Result<ClientPayload, ValidationError> {
        let company = NonEmptyString::new(self.company.as_str())
            .map_err(|_| ValidationError::MissingField("empresa"))?;
        let contact_name = NonEmptyString::new(self.contact_name.as_str())
            .map_err(|_| ValidationError::MissingField("nombre_contacto"))?;
        self.validate()?;

        let phone = Some(self.phone.trim().to_string()).filter(|s| !s.is_empty());
        Ok(ClientPayload {
            company,
            contact_name,
            email: self.email.trim().to_string(),
            phone,
            status: self.status,
        })
    }
}
