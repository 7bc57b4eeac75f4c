use crate::api::Resource;
use crate::domain::client::Client;
use crate::domain::project::Project;
use crate::domain::types::{ClientId, ProjectId};
use crate::forms::client::ClientDraft;
use crate::forms::project::ProjectDraft;

impl Resource for Client {
    type Id = ClientId;
    type Draft = ClientDraft;

    const COLLECTION_PATH: &'static str = "/api/clientes";
    const NAME: &'static str = "client";

    fn id(&self) -> ClientId {
        self.id
    }

    fn delete_prompt(&self) -> String {
        format!("¿Estás seguro de que deseas eliminar a {}?", self.company)
    }
}

impl Resource for Project {
    type Id = ProjectId;
    type Draft = ProjectDraft;

    const COLLECTION_PATH: &'static str = "/api/proyectos";
    const NAME: &'static str = "project";

    fn id(&self) -> ProjectId {
        self.id
    }

    fn delete_prompt(&self) -> String {
        "¿Eliminar proyecto?".to_string()
    }
}
