//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{ManagedProject, ProjectModule};

/// The result of a create operation: a confirmation line followed by the
/// created resource.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<ManagedProject> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created project with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ProjectModule> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added module with ID: {} to project {}",
            self.resource.id, self.resource.project_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// The result of an update, optionally listing what changed.
///
/// # Examples
///
/// ```rust
/// use keystone_core::display::UpdateResult;
/// use keystone_core::models::{ModuleStatus, ProjectModule};
/// use jiff::{civil::date, Timestamp};
///
/// let module = ProjectModule {
///     id: 2,
///     project_id: 1,
///     name: "Checkout flow".to_string(),
///     description: None,
///     deadline: date(2026, 5, 1),
///     status: ModuleStatus::InProgress,
///     order: 1,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let result = UpdateResult::with_changes(module, vec!["Status: inprogress".to_string()]);
/// let output = result.to_string();
/// assert!(output.starts_with("Updated module with ID: 2"));
/// assert!(output.contains("Changes made:"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<ManagedProject> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated project with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<ProjectModule> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated module with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// The result of a delete: names what is gone.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<ManagedProject> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted project '{}' (ID: {}) and {} module(s)",
            self.resource.name,
            self.resource.id,
            self.resource.modules.len()
        )
    }
}

impl fmt::Display for DeleteResult<ProjectModule> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed module '{}' (ID: {}) from project {}",
            self.resource.name, self.resource.id, self.resource.project_id
        )
    }
}

/// Confirmation that a project reached `CLOSED_SUCCESSFULLY`.
pub struct CloseResult {
    pub project: ManagedProject,
}

impl CloseResult {
    pub fn new(project: ManagedProject) -> Self {
        Self { project }
    }
}

impl fmt::Display for CloseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Success: Project '{}' (ID: {}) closed successfully",
            self.project.name, self.project.id
        )
    }
}
