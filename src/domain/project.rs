use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ProjectId, ProjectStatus};

/// Project record as returned by `GET /api/proyectos`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    #[serde(rename = "cliente_id")]
    pub client_id: ClientId,
    #[serde(rename = "nombre_proyecto")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    /// Not required to be on or after `start_date`.
    #[serde(rename = "fecha_fin", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "estado")]
    pub status: ProjectStatus,
    /// Denormalized copy of the owning client, joined in by the server.
    #[serde(rename = "clientes", default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientSnapshot>,
}

/// Subset of client columns the server joins into each project.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientSnapshot {
    #[serde(rename = "empresa", default)]
    pub company: Option<String>,
    #[serde(rename = "nombre_contacto", default)]
    pub contact_name: Option<String>,
}
