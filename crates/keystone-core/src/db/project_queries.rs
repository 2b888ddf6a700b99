//! Project CRUD operations and guarded workflow updates.

use jiff::Timestamp;
use rusqlite::{params, ToSql};

use super::rows::{load_modules, load_project, project_from_row, PROJECT_COLUMNS};
use crate::{
    error::{Result, StoreResultExt},
    models::{
        Budget, ManagedProject, PaymentStatus, ProjectFilter, ProjectStatus, ProjectUpdate,
        UpdateGuard,
    },
};

const INSERT_PROJECT_SQL: &str = "INSERT INTO projects (name, description, budget_amount, budget_currency, status, send_for_approval, approved_by_finance, payment_status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, ?6, ?7, ?8)";
const DELETE_PROJECT_SQL: &str = "DELETE FROM projects WHERE id = ?1";

impl super::Database {
    /// Inserts a project in its initial lifecycle state: `ACTIVE`, no
    /// approval requested or granted, payment `PENDING`.
    pub fn create_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        budget: &Budget,
    ) -> Result<ManagedProject> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PROJECT_SQL,
            params![
                name,
                description,
                budget.amount,
                &budget.currency,
                ProjectStatus::Active.as_str(),
                PaymentStatus::Pending.as_str(),
                &now_str,
                &now_str
            ],
        )
        .store_context("Failed to insert project")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(ManagedProject {
            id,
            name: name.to_string(),
            description: description.map(String::from),
            budget: budget.clone(),
            proposed_budget: None,
            status: ProjectStatus::Active,
            send_for_approval: false,
            approved_by_finance: false,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
            modules: Vec::new(),
        })
    }

    /// Retrieves a project and its modules by ID.
    pub fn get_project(&self, id: u64) -> Result<Option<ManagedProject>> {
        load_project(&self.connection, id).store_context("Failed to query project")
    }

    /// Lists projects matching the filter, newest first.
    pub fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ManagedProject>> {
        let mut query = format!("SELECT {PROJECT_COLUMNS} FROM projects");

        let mut conditions: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if !filter.status_in.is_empty() {
            conditions.push(format!(
                "status IN ({})",
                placeholders(filter.status_in.len())
            ));
            values.extend(
                filter
                    .status_in
                    .iter()
                    .map(|s| Box::new(s.as_str()) as Box<dyn ToSql>),
            );
        }

        if !filter.status_not_in.is_empty() {
            conditions.push(format!(
                "status NOT IN ({})",
                placeholders(filter.status_not_in.len())
            ));
            values.extend(
                filter
                    .status_not_in
                    .iter()
                    .map(|s| Box::new(s.as_str()) as Box<dyn ToSql>),
            );
        }

        if let Some(flag) = filter.send_for_approval {
            conditions.push("send_for_approval = ?".to_string());
            values.push(Box::new(flag));
        }

        if let Some(flag) = filter.approved_by_finance {
            conditions.push("approved_by_finance = ?".to_string());
            values.push(Box::new(flag));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .store_context("Failed to prepare query")?;

        let value_refs: Vec<&dyn ToSql> = values.iter().map(|b| &**b).collect();

        let mut projects = stmt
            .query_map(&value_refs[..], project_from_row)
            .store_context("Failed to query projects")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .store_context("Failed to fetch projects")?;

        for project in &mut projects {
            project.modules =
                load_modules(&self.connection, project.id).store_context("Failed to load modules")?;
        }

        Ok(projects)
    }

    /// Applies an allow-listed update as a single conditional `UPDATE`.
    ///
    /// The guard becomes part of the `WHERE` clause, so the check and the
    /// write cannot interleave with another writer. Returns `None` when no
    /// row matched.
    pub fn apply_project_update(
        &mut self,
        id: u64,
        update: &ProjectUpdate,
        guard: &UpdateGuard,
    ) -> Result<Option<ManagedProject>> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(status) = update.status {
            assignments.push("status = ?");
            values.push(Box::new(status.as_str()));
        }
        if let Some(flag) = update.send_for_approval {
            assignments.push("send_for_approval = ?");
            values.push(Box::new(flag));
        }
        if let Some(flag) = update.approved_by_finance {
            assignments.push("approved_by_finance = ?");
            values.push(Box::new(flag));
        }
        if let Some(payment_status) = update.payment_status {
            assignments.push("payment_status = ?");
            values.push(Box::new(payment_status.as_str()));
        }
        if let Some(budget) = &update.budget {
            assignments.push("budget_amount = ?");
            values.push(Box::new(budget.amount));
            assignments.push("budget_currency = ?");
            values.push(Box::new(budget.currency.clone()));
        }
        if let Some(proposed) = &update.proposed_budget {
            assignments.push("proposed_budget_amount = ?");
            values.push(Box::new(proposed.as_ref().and_then(|b| b.amount)));
            assignments.push("proposed_budget_currency = ?");
            values.push(Box::new(proposed.as_ref().map(|b| b.currency.clone())));
        }

        let now = Timestamp::now().to_string();
        assignments.push("updated_at = ?");
        values.push(Box::new(now));

        let mut sql = format!("UPDATE projects SET {} WHERE id = ?", assignments.join(", "));
        values.push(Box::new(id as i64));

        if let Some(status) = guard.status {
            sql.push_str(" AND status = ?");
            values.push(Box::new(status.as_str()));
        }
        if let Some(payment_status) = guard.payment_status {
            sql.push_str(" AND payment_status = ?");
            values.push(Box::new(payment_status.as_str()));
        }
        if let Some(flag) = guard.send_for_approval {
            sql.push_str(" AND send_for_approval = ?");
            values.push(Box::new(flag));
        }
        if let Some(flag) = guard.approved_by_finance {
            sql.push_str(" AND approved_by_finance = ?");
            values.push(Box::new(flag));
        }
        if let Some(proposed) = &guard.proposed_budget {
            // `IS` so that an unset proposal matches NULL columns
            sql.push_str(" AND proposed_budget_amount IS ? AND proposed_budget_currency IS ?");
            values.push(Box::new(proposed.as_ref().and_then(|b| b.amount)));
            values.push(Box::new(proposed.as_ref().map(|b| b.currency.clone())));
        }

        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let value_refs: Vec<&dyn ToSql> = values.iter().map(|b| &**b).collect();
        let rows_affected = tx
            .execute(&sql, &value_refs[..])
            .store_context("Failed to update project")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let project = load_project(&tx, id).store_context("Failed to query updated project")?;

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(project)
    }

    /// Permanently deletes a project; its modules cascade with it.
    pub fn remove_project(&mut self, id: u64) -> Result<Option<ManagedProject>> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let project = load_project(&tx, id).store_context("Failed to query project")?;

        if project.is_some() {
            tx.execute(DELETE_PROJECT_SQL, params![id as i64])
                .store_context("Failed to delete project")?;
        }

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(project)
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
