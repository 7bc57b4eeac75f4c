use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::{ClientStatus, TypeConstraintError, fold_label};
use crate::query::Queryable;

/// Label of the card listing clients with no linked projects.
pub const WITHOUT_PROJECTS_LABEL: &str = "Sin Proyectos";

/// Status cards of the client view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientFilter {
    Status(ClientStatus),
    /// `proyectos` absent or empty.
    WithoutProjects,
}

impl ClientFilter {
    pub const fn label(self) -> &'static str {
        match self {
            ClientFilter::Status(status) => status.label(),
            ClientFilter::WithoutProjects => WITHOUT_PROJECTS_LABEL,
        }
    }
}

impl Display for ClientFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClientFilter {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if fold_label(s) == fold_label(WITHOUT_PROJECTS_LABEL) {
            return Ok(ClientFilter::WithoutProjects);
        }
        s.parse().map(ClientFilter::Status)
    }
}

impl From<ClientStatus> for ClientFilter {
    fn from(status: ClientStatus) -> Self {
        ClientFilter::Status(status)
    }
}

/// Card counts for the client view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub without_projects: usize,
}

impl Queryable for Client {
    type Filter = ClientFilter;
    type Stats = ClientStats;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.company.as_str(), self.contact_name.as_str()]
    }

    fn matches_filter(&self, filter: ClientFilter) -> bool {
        match filter {
            ClientFilter::Status(status) => self.status == status,
            ClientFilter::WithoutProjects => self.has_no_projects(),
        }
    }

    fn summarize(items: &[Self]) -> ClientStats {
        items.iter().fold(
            ClientStats {
                total: items.len(),
                ..ClientStats::default()
            },
            |mut stats, client| {
                match client.status {
                    ClientStatus::Active => stats.active += 1,
                    ClientStatus::Inactive => stats.inactive += 1,
                }
                if client.has_no_projects() {
                    stats.without_projects += 1;
                }
                stats
            },
        )
    }
}
