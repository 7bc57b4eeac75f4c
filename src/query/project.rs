use serde::Serialize;

use crate::domain::project::Project;
use crate::domain::types::ProjectStatus;
use crate::query::Queryable;

/// Card counts for the project view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub planning: usize,
    pub in_progress: usize,
    pub finished: usize,
}

impl Queryable for Project {
    type Filter = ProjectStatus;
    type Stats = ProjectStats;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        if let Some(client) = &self.client {
            fields.extend(client.contact_name.as_deref());
            fields.extend(client.company.as_deref());
        }
        fields
    }

    fn matches_filter(&self, filter: ProjectStatus) -> bool {
        self.status == filter
    }

    fn summarize(items: &[Self]) -> ProjectStats {
        items.iter().fold(
            ProjectStats {
                total: items.len(),
                ..ProjectStats::default()
            },
            |mut stats, project| {
                match project.status {
                    ProjectStatus::Planning => stats.planning += 1,
                    ProjectStatus::InProgress => stats.in_progress += 1,
                    ProjectStatus::Finished => stats.finished += 1,
                }
                stats
            },
        )
    }
}
