use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientStatus, ProjectId, ProjectStatus};

/// Client record as returned by `GET /api/clientes`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "nombre_contacto")]
    pub contact_name: String,
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "estado")]
    pub status: ClientStatus,
    /// Projects referencing this client, filled in by the server.
    #[serde(rename = "proyectos", default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<LinkedProject>>,
}

/// Read-only summary of a project embedded in a [`Client`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkedProject {
    pub id: ProjectId,
    #[serde(rename = "nombre_proyecto")]
    pub name: String,
    #[serde(rename = "estado", default)]
    pub status: Option<ProjectStatus>,
}

impl Client {
    /// `true` when the server reported no linked projects at all.
    pub fn has_no_projects(&self) -> bool {
        self.projects.as_ref().is_none_or(Vec::is_empty)
    }

    /// Label used by the project form's client selector.
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.contact_name, self.company)
    }
}
