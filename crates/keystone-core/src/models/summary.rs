//! Project summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ManagedProject, ModuleStatus, PaymentStatus, ProjectStatus};

/// Summary information about a project with module statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project ID
    pub id: u64,
    /// Name of the project
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Lifecycle status
    pub status: ProjectStatus,
    /// Payment state
    pub payment_status: PaymentStatus,
    /// Finance approval is outstanding
    pub send_for_approval: bool,
    /// Finance approved the budget
    pub approved_by_finance: bool,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of modules
    pub total_modules: u32,
    /// Number of completed modules
    pub completed_modules: u32,
}

impl From<&ManagedProject> for ProjectSummary {
    fn from(project: &ManagedProject) -> Self {
        let total_modules = project.modules.len() as u32;
        let completed_modules = project
            .modules
            .iter()
            .filter(|module| module.status == ModuleStatus::Completed)
            .count() as u32;

        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            payment_status: project.payment_status,
            send_for_approval: project.send_for_approval,
            approved_by_finance: project.approved_by_finance,
            created_at: project.created_at,
            updated_at: project.updated_at,
            total_modules,
            completed_modules,
        }
    }
}
