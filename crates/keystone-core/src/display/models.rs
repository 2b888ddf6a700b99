//! Display implementations for domain models.
//!
//! Output is Markdown: projects render as a top-level heading with a
//! metadata list, modules as third-level headings with their status icon.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use crate::models::{
    ActionableFilter, Budget, ManagedProject, ModuleStatus, PaymentStatus, ProjectModule,
    ProjectStatus, ProjectSummary,
};

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ActionableFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(amount) => write!(f, "{amount:.2} {}", self.currency),
            None => write!(f, "not set ({})", self.currency),
        }
    }
}

/// A timestamp shown in the system time zone.
struct Local<'a>(&'a Timestamp);

impl fmt::Display for Local<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M %Z"))
    }
}

fn approval_label(send_for_approval: bool, approved_by_finance: bool) -> &'static str {
    match (send_for_approval, approved_by_finance) {
        (_, true) => "Approved by finance",
        (true, false) => "Awaiting finance",
        (false, false) => "Not requested",
    }
}

impl fmt::Display for ManagedProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Budget: {}", self.budget)?;
        if let Some(proposed) = &self.proposed_budget {
            writeln!(f, "- Proposed budget: {proposed}")?;
        }
        writeln!(
            f,
            "- Approval: {}",
            approval_label(self.send_for_approval, self.approved_by_finance)
        )?;
        writeln!(f, "- Payment: {}", self.payment_status)?;
        writeln!(f, "- Created: {}", Local(&self.created_at))?;
        writeln!(f, "- Updated: {}", Local(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.modules.is_empty() {
            writeln!(f, "\nNo modules in this project.")?;
        } else {
            writeln!(f, "\n## Modules")?;
            writeln!(f)?;
            for module in &self.modules {
                write!(f, "{module}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ProjectModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.name,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Deadline: {}", self.deadline)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_modules > 0 {
            format!(" ({}/{})", self.completed_modules, self.total_modules)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.status)?;
        writeln!(
            f,
            "- **Approval**: {}",
            approval_label(self.send_for_approval, self.approved_by_finance)
        )?;
        writeln!(f, "- **Payment**: {}", self.payment_status)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }

        writeln!(f, "- **Updated**: {}", Local(&self.updated_at))?;
        writeln!(f)?;

        Ok(())
    }
}
