use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::query::client::ClientStats;
use crate::query::project::ProjectStats;

/// Entry of the project form's client selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientOption {
    pub id: ClientId,
    pub label: String,
}

impl From<&Client> for ClientOption {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            label: client.option_label(),
        }
    }
}

/// Header greeting plus the status card counts of both views.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub greeting: String,
    pub clients: ClientStats,
    pub projects: ProjectStats,
}
