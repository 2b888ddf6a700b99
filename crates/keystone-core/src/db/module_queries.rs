//! Module CRUD operations.

use jiff::Timestamp;
use rusqlite::params;

use super::rows::load_module;
use crate::{
    error::{LifecycleError, Result, StoreResultExt},
    models::{NewModule, ProjectModule, UpdateModuleRequest},
};

const CHECK_PROJECT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)";
const GET_NEXT_MODULE_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(module_order), -1) + 1 FROM project_modules WHERE project_id = ?1";
const INSERT_MODULE_SQL: &str = "INSERT INTO project_modules (project_id, name, description, deadline, status, module_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_MODULE_SQL: &str = "UPDATE project_modules SET name = ?1, description = ?2, deadline = ?3, status = ?4, updated_at = ?5 WHERE id = ?6";
const DELETE_MODULE_SQL: &str = "DELETE FROM project_modules WHERE id = ?1";
const UPDATE_MODULE_ORDERS_DECREMENT_SQL: &str =
    "UPDATE project_modules SET module_order = module_order - 1 WHERE project_id = ?1 AND module_order > ?2";
const UPDATE_PROJECT_TIMESTAMP_SQL: &str = "UPDATE projects SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Appends a module to the end of its project's module list.
    pub fn add_module(&mut self, module: &NewModule) -> Result<ProjectModule> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let project_exists: bool = tx
            .query_row(
                CHECK_PROJECT_EXISTS_SQL,
                params![module.project_id as i64],
                |row| row.get(0),
            )
            .store_context("Failed to check project existence")?;

        if !project_exists {
            return Err(LifecycleError::ProjectNotFound {
                id: module.project_id,
            });
        }

        let next_order: i64 = tx
            .query_row(
                GET_NEXT_MODULE_ORDER_SQL,
                params![module.project_id as i64],
                |row| row.get(0),
            )
            .store_context("Failed to get next module order")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_MODULE_SQL,
            params![
                module.project_id as i64,
                &module.name,
                module.description.as_deref(),
                module.deadline.to_string(),
                module.status.as_str(),
                next_order,
                &now_str,
                &now_str
            ],
        )
        .store_context("Failed to insert module")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, module.project_id as i64],
        )
        .store_context("Failed to update project timestamp")?;

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(ProjectModule {
            id,
            project_id: module.project_id,
            name: module.name.clone(),
            description: module.description.clone(),
            deadline: module.deadline,
            status: module.status,
            order: next_order as u32,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates the given fields of a module and touches its project.
    pub fn modify_module(
        &mut self,
        id: u64,
        request: &UpdateModuleRequest,
    ) -> Result<Option<ProjectModule>> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let current = load_module(&tx, id).store_context("Failed to query module")?;

        let Some(mut module) = current else {
            return Ok(None);
        };

        let now = Timestamp::now();
        request.apply_to(&mut module, now);
        let now_str = now.to_string();

        tx.execute(
            UPDATE_MODULE_SQL,
            params![
                &module.name,
                module.description.as_deref(),
                module.deadline.to_string(),
                module.status.as_str(),
                &now_str,
                id as i64
            ],
        )
        .store_context("Failed to update module")?;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, module.project_id as i64],
        )
        .store_context("Failed to update project timestamp")?;

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(Some(module))
    }

    /// Deletes a module and shifts later modules up by one position.
    pub fn remove_module(&mut self, id: u64) -> Result<Option<ProjectModule>> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let current = load_module(&tx, id).store_context("Failed to query module")?;

        let Some(module) = current else {
            return Ok(None);
        };

        tx.execute(DELETE_MODULE_SQL, params![id as i64])
            .store_context("Failed to delete module")?;

        tx.execute(
            UPDATE_MODULE_ORDERS_DECREMENT_SQL,
            params![module.project_id as i64, module.order as i64],
        )
        .store_context("Failed to reorder modules")?;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), module.project_id as i64],
        )
        .store_context("Failed to update project timestamp")?;

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(Some(module))
    }
}
