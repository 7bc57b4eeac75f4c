//! Clients and projects views sharing one transport.

use std::rc::Rc;

use crate::api::{Resource, Transport};
use crate::domain::client::Client;
use crate::domain::project::Project;
use crate::domain::session::{SessionIdentity, greeting};
use crate::domain::types::{ClientId, ProjectId};
use crate::dto::dashboard::{ClientOption, DashboardSummary};
use crate::query::Queryable;
use crate::services::panel::{Confirm, DeleteOutcome, EntityPanel, SubmitOutcome};
use crate::services::{FetchError, SyncResult};

/// Outcome of loading both collections. Each side fails independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub clients: Result<usize, FetchError>,
    pub projects: Result<usize, FetchError>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.clients.is_ok() && self.projects.is_ok()
    }
}

/// A write made through the dashboard, plus the reload of the other
/// collection whose server-joined fields depend on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardWrite<O> {
    pub outcome: O,
    /// `None` when nothing was written.
    pub peer_refresh: Option<Result<usize, FetchError>>,
}

async fn refresh_peer<O, P, T>(
    outcome: O,
    written: bool,
    peer: &EntityPanel<P, T>,
) -> DashboardWrite<O>
where
    P: Resource,
    T: Transport,
{
    let peer_refresh = if written {
        Some(peer.load().await)
    } else {
        None
    };
    DashboardWrite {
        outcome,
        peer_refresh,
    }
}

pub struct Dashboard<T> {
    clients: EntityPanel<Client, T>,
    projects: EntityPanel<Project, T>,
    greeting: String,
}

impl<T: Transport> Dashboard<T> {
    pub fn new<I>(transport: Rc<T>, identity: &I) -> Self
    where
        I: SessionIdentity + ?Sized,
    {
        Self {
            clients: EntityPanel::new(Rc::clone(&transport)),
            projects: EntityPanel::new(transport),
            greeting: greeting(identity),
        }
    }

    pub fn clients(&self) -> &EntityPanel<Client, T> {
        &self.clients
    }

    pub fn projects(&self) -> &EntityPanel<Project, T> {
        &self.projects
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Loads both collections concurrently.
    pub async fn load_all(&self) -> LoadReport {
        let (clients, projects) = futures::join!(self.clients.load(), self.projects.load());
        LoadReport { clients, projects }
    }

    /// Saves the client form. Projects are reloaded afterwards since they
    /// carry a copy of the client's name fields.
    pub async fn submit_client(&self) -> SyncResult<DashboardWrite<SubmitOutcome>> {
        let outcome = self.clients.submit().await?;
        let written = matches!(outcome, SubmitOutcome::Saved { .. });
        Ok(refresh_peer(outcome, written, &self.projects).await)
    }

    /// Saves the project form. Clients are reloaded afterwards since the
    /// server lists each client's projects.
    pub async fn submit_project(&self) -> SyncResult<DashboardWrite<SubmitOutcome>> {
        let outcome = self.projects.submit().await?;
        let written = matches!(outcome, SubmitOutcome::Saved { .. });
        Ok(refresh_peer(outcome, written, &self.clients).await)
    }

    pub async fn delete_client<C>(
        &self,
        id: ClientId,
        confirm: &C,
    ) -> SyncResult<DashboardWrite<DeleteOutcome>>
    where
        C: Confirm + ?Sized,
    {
        let outcome = self.clients.delete(id, confirm).await?;
        let written = outcome == DeleteOutcome::Deleted;
        Ok(refresh_peer(outcome, written, &self.projects).await)
    }

    pub async fn delete_project<C>(
        &self,
        id: ProjectId,
        confirm: &C,
    ) -> SyncResult<DashboardWrite<DeleteOutcome>>
    where
        C: Confirm + ?Sized,
    {
        let outcome = self.projects.delete(id, confirm).await?;
        let written = outcome == DeleteOutcome::Deleted;
        Ok(refresh_peer(outcome, written, &self.clients).await)
    }

    /// Client selector options for the project form, in store order.
    pub fn client_options(&self) -> Vec<ClientOption> {
        self.clients.items().iter().map(ClientOption::from).collect()
    }

    /// Greeting and unfiltered counts for both views.
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            greeting: self.greeting.clone(),
            clients: Client::summarize(&self.clients.items()),
            projects: Project::summarize(&self.projects.items()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::test::ScriptedTransport;
    use crate::api::{ApiRequest, HttpMethod};
    use crate::domain::session::MockSessionIdentity;

    fn identity(name: Option<&str>) -> MockSessionIdentity {
        let name = name.map(str::to_string);
        let mut identity = MockSessionIdentity::new();
        identity
            .expect_display_name()
            .returning(move || name.clone());
        identity
    }

    fn clients_body() -> serde_json::Value {
        json!([
            {
                "id": 1,
                "empresa": "Acme",
                "nombre_contacto": "Ana",
                "email": "ana@acme.test",
                "estado": "Activo",
                "proyectos": [{"id": 10, "nombre_proyecto": "Portal"}]
            },
            {
                "id": 2,
                "empresa": "Beta",
                "nombre_contacto": "Bruno",
                "email": "bruno@beta.test",
                "estado": "Inactivo"
            }
        ])
    }

    fn projects_body() -> serde_json::Value {
        json!([{
            "id": 10,
            "cliente_id": 1,
            "nombre_proyecto": "Portal",
            "fecha_inicio": "2024-01-15",
            "estado": "En Progreso",
            "clientes": {"empresa": "Acme", "nombre_contacto": "Ana"}
        }])
    }

    #[actix_rt::test]
    async fn loads_both_collections_and_summarizes() {
        let transport = Rc::new(ScriptedTransport::new());
        transport
            .respond(200, clients_body())
            .respond(200, projects_body());
        let dashboard = Dashboard::new(Rc::clone(&transport), &identity(Some("Lucía")));

        let report = dashboard.load_all().await;
        assert!(report.is_ok());

        let summary = dashboard.summary();
        assert_eq!(summary.greeting, "Bienvenido, Lucía");
        assert_eq!(summary.clients.total, 2);
        assert_eq!(summary.clients.active, 1);
        assert_eq!(summary.clients.without_projects, 1);
        assert_eq!(summary.projects.total, 1);
        assert_eq!(summary.projects.in_progress, 1);

        assert_eq!(transport.count(HttpMethod::Get), 2);
        let paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
        assert!(paths.contains(&"/api/clientes".to_string()));
        assert!(paths.contains(&"/api/proyectos".to_string()));
    }

    #[actix_rt::test]
    async fn one_failed_collection_does_not_block_the_other() {
        let transport = Rc::new(ScriptedTransport::new());
        transport
            .respond(500, json!({}))
            .respond(200, projects_body());
        let dashboard = Dashboard::new(Rc::clone(&transport), &identity(None));

        let report = dashboard.load_all().await;
        assert_eq!(report.clients, Err(FetchError::Status(500)));
        assert_eq!(report.projects, Ok(1));
        assert!(!report.is_ok());
        assert_eq!(dashboard.greeting(), "Bienvenido, Usuario");
        assert!(dashboard.client_options().is_empty());
    }

    #[actix_rt::test]
    async fn client_options_follow_the_client_store() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, clients_body());
        let dashboard = Dashboard::new(transport, &identity(None));
        dashboard.clients().load().await.unwrap();

        let labels: Vec<String> = dashboard
            .client_options()
            .into_iter()
            .map(|option| option.label)
            .collect();
        assert_eq!(labels, vec!["Ana (Acme)", "Bruno (Beta)"]);
    }

    fn paths(transport: &ScriptedTransport) -> Vec<String> {
        transport
            .requests()
            .into_iter()
            .map(|request| format!("{} {}", request.method, request.path))
            .collect()
    }

    #[actix_rt::test]
    async fn new_project_refreshes_client_cross_reference() {
        let transport = Rc::new(ScriptedTransport::new());
        transport
            .respond(
                200,
                json!([{
                    "id": 1,
                    "empresa": "Acme",
                    "nombre_contacto": "Ana",
                    "email": "ana@acme.test",
                    "estado": "Activo",
                    "proyectos": []
                }]),
            )
            .respond(200, json!([]));
        let dashboard = Dashboard::new(Rc::clone(&transport), &identity(None));
        dashboard.load_all().await;
        assert_eq!(dashboard.summary().clients.without_projects, 1);

        let projects = dashboard.projects();
        projects.begin_create().unwrap();
        projects
            .update_draft(|draft| {
                draft.client_id = Some(dashboard.client_options()[0].id);
                draft.name = "Portal".into();
                draft.set_start_date("2024-01-15")
            })
            .unwrap()
            .unwrap();
        transport
            .respond(201, json!({}))
            .respond(200, projects_body())
            .respond(
                200,
                json!([{
                    "id": 1,
                    "empresa": "Acme",
                    "nombre_contacto": "Ana",
                    "email": "ana@acme.test",
                    "estado": "Activo",
                    "proyectos": [{"id": 10, "nombre_proyecto": "Portal"}]
                }]),
            );

        let write = dashboard.submit_project().await.unwrap();
        assert_eq!(
            write.outcome,
            SubmitOutcome::Saved {
                created: true,
                refresh: Ok(1)
            }
        );
        assert_eq!(write.peer_refresh, Some(Ok(1)));
        assert_eq!(dashboard.summary().clients.without_projects, 0);
        assert_eq!(
            paths(&transport)[2..],
            [
                "POST /api/proyectos",
                "GET /api/proyectos",
                "GET /api/clientes"
            ]
        );
    }

    #[actix_rt::test]
    async fn rejected_project_write_skips_peer_reload() {
        let transport = Rc::new(ScriptedTransport::new());
        let dashboard = Dashboard::new(Rc::clone(&transport), &identity(None));
        dashboard.projects().begin_create().unwrap();

        let result = dashboard.submit_project().await;
        assert!(result.is_err());
        assert!(transport.requests().is_empty());
    }

    #[actix_rt::test]
    async fn client_update_reloads_projects() {
        let transport = Rc::new(ScriptedTransport::new());
        transport
            .respond(200, clients_body())
            .respond(200, projects_body());
        let dashboard = Dashboard::new(Rc::clone(&transport), &identity(None));
        dashboard.load_all().await;

        let id = dashboard.client_options()[0].id;
        dashboard.clients().begin_edit(id).unwrap();
        dashboard
            .clients()
            .update_draft(|draft| draft.company = "Acme Global".into())
            .unwrap();
        transport
            .respond(200, json!({}))
            .respond(200, clients_body())
            .respond(500, json!({}));

        let write = dashboard.submit_client().await.unwrap();
        assert!(matches!(write.outcome, SubmitOutcome::Saved { created: false, .. }));
        assert_eq!(write.peer_refresh, Some(Err(FetchError::Status(500))));
        assert_eq!(dashboard.projects().items().len(), 1);
    }

    #[actix_rt::test]
    async fn deleting_a_project_reloads_clients_only() {
        let transport = Rc::new(ScriptedTransport::new());
        transport
            .respond(200, clients_body())
            .respond(200, projects_body());
        let dashboard = Dashboard::new(Rc::clone(&transport), &identity(None));
        dashboard.load_all().await;

        let id = dashboard.projects().items()[0].id;
        let declined = dashboard
            .delete_project(id, &|_: &str| false)
            .await
            .unwrap();
        assert_eq!(declined.outcome, DeleteOutcome::Declined);
        assert_eq!(declined.peer_refresh, None);

        transport
            .respond(204, serde_json::Value::Null)
            .respond(200, json!([]));
        let write = dashboard
            .delete_project(id, &|_: &str| true)
            .await
            .unwrap();
        assert_eq!(write.outcome, DeleteOutcome::Deleted);
        assert_eq!(write.peer_refresh, Some(Ok(0)));
        assert!(dashboard.projects().items().is_empty());
        assert_eq!(
            paths(&transport)[2..],
            ["DELETE /api/proyectos/10", "GET /api/clientes"]
        );
    }

    #[actix_rt::test]
    async fn deleting_a_client_reloads_projects() {
        let transport = Rc::new(ScriptedTransport::new());
        transport
            .respond(200, clients_body())
            .respond(200, json!({}))
            .respond(200, json!([]));
        let dashboard = Dashboard::new(Rc::clone(&transport), &identity(None));
        dashboard.clients().load().await.unwrap();

        let id = dashboard.client_options()[1].id;
        let write = dashboard.delete_client(id, &|_: &str| true).await.unwrap();
        assert_eq!(write.outcome, DeleteOutcome::Deleted);
        assert_eq!(write.peer_refresh, Some(Ok(0)));
        assert_eq!(dashboard.client_options().len(), 1);
    }

    #[actix_rt::test]
    async fn deleting_a_client_refreshes_options() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, clients_body()).respond(200, json!({}));
        let dashboard = Dashboard::new(Rc::clone(&transport), &identity(None));
        dashboard.clients().load().await.unwrap();

        let id = dashboard.client_options()[1].id;
        dashboard.clients().delete(id, &|_: &str| true).await.unwrap();

        assert_eq!(dashboard.client_options().len(), 1);
        assert_eq!(
            transport.requests().last(),
            Some(&ApiRequest::delete("/api/clientes/2"))
        );
    }
}
