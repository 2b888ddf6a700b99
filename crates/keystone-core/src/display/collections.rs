//! Collection wrapper for displaying project listings.

use std::{fmt, ops::Index};

use crate::models::ProjectSummary;

/// Newtype wrapper for displaying a list of project summaries.
///
/// Carries no heading; callers add one for the queue being shown.
///
/// # Examples
///
/// ```rust
/// use keystone_core::display::ProjectSummaries;
///
/// let empty = ProjectSummaries(vec![]);
/// assert_eq!(empty.to_string(), "No projects found.\n");
/// ```
pub struct ProjectSummaries(pub Vec<ProjectSummary>);

impl ProjectSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectSummary> {
        self.0.iter()
    }
}

impl Index<usize> for ProjectSummaries {
    type Output = ProjectSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a ProjectSummaries {
    type Item = &'a ProjectSummary;
    type IntoIter = std::slice::Iter<'a, ProjectSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ProjectSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No projects found.");
        }
        for summary in &self.0 {
            write!(f, "{summary}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{PaymentStatus, ProjectStatus};

    fn summary(id: u64, name: &str) -> ProjectSummary {
        ProjectSummary {
            id,
            name: name.to_string(),
            description: None,
            status: ProjectStatus::Active,
            payment_status: PaymentStatus::Pending,
            send_for_approval: false,
            approved_by_finance: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            total_modules: 0,
            completed_modules: 0,
        }
    }

    #[test]
    fn test_project_summaries_display() {
        let summaries = ProjectSummaries(vec![summary(2, "Intranet"), summary(1, "Helpdesk")]);
        let output = summaries.to_string();

        assert_eq!(summaries.len(), 2);
        assert!(output.contains("## Intranet (ID: 2)"));
        assert!(output.contains("## Helpdesk (ID: 1)"));
        assert!(!output.starts_with("# "));
        assert!(output.find("Intranet") < output.find("Helpdesk"));
    }
}
