use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::project::Project;
use crate::domain::types::{ClientId, NonEmptyString, ProjectStatus, parse_form_date};
use crate::forms::{Draft, ValidationError};

#[derive(Clone, Debug, Default, PartialEq)]
/// Form data for creating or updating a project.
pub struct ProjectDraft {
    /// Owning client picked from the selector.
    pub client_id: Option<ClientId>,
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    /// Not checked against `start_date`.
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    /// Sets `fecha_inicio` from date-input text. Blank text clears it; an
    /// unparsable value leaves the draft untouched.
    pub fn set_start_date(&mut self, text: &str) -> Result<(), ValidationError> {
        self.start_date = parse_form_date(text)?;
        Ok(())
    }

    /// Same as [`ProjectDraft::set_start_date`] for `fecha_fin`.
    pub fn set_end_date(&mut self, text: &str) -> Result<(), ValidationError> {
        self.end_date = parse_form_date(text)?;
        Ok(())
    }
}

/// Request body for `POST /api/proyectos` and `PUT /api/proyectos/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProjectPayload {
    #[serde(rename = "cliente_id")]
    pub client_id: ClientId,
    #[serde(rename = "nombre_proyecto")]
    pub name: NonEmptyString,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "estado")]
    pub status: ProjectStatus,
}

impl Draft for ProjectDraft {
    type Entity = Project;
    type Payload = ProjectPayload;

    fn from_entity(project: &Project) -> Self {
        Self {
            client_id: Some(project.client_id),
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_default(),
            start_date: Some(project.start_date),
            end_date: project.end_date,
            status: project.status,
        }
    }

    /// Checks client, name and start date, in that order.
    fn to_payload(&self) -> Result<ProjectPayload, ValidationError> {
        let client_id = self
            .client_id
            .ok_or(ValidationError::MissingField("cliente_id"))?;
        let name = NonEmptyString::new(self.name.as_str())
            .map_err(|_| ValidationError::MissingField("nombre_proyecto"))?;
        let start_date = self
            .start_date
            .ok_or(ValidationError::MissingField("fecha_inicio"))?;

        let description = Some(self.description.trim().to_string()).filter(|s| !s.is_empty());

        Ok(ProjectPayload {
            client_id,
            name,
            description,
            start_date,
            end_date: self.end_date,
            status: self.status,
        })
    }
}
