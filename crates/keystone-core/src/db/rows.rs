//! Row decoding shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use crate::models::{
    Budget, ManagedProject, ModuleStatus, PaymentStatus, ProjectModule, ProjectStatus,
};

pub(super) const PROJECT_COLUMNS: &str = "id, name, description, budget_amount, budget_currency, proposed_budget_amount, proposed_budget_currency, status, send_for_approval, approved_by_finance, payment_status, created_at, updated_at";
pub(super) const MODULE_COLUMNS: &str =
    "id, project_id, name, description, deadline, status, module_order, created_at, updated_at";

/// Parse a text column through `FromStr`, surfacing failures as conversion
/// errors on that column.
fn parse_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("Invalid value '{raw}': {e}").into(),
        )
    })
}

fn parse_timestamp(row: &Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Build a project (without modules) from a row selected with
/// [`PROJECT_COLUMNS`].
pub(super) fn project_from_row(row: &Row) -> rusqlite::Result<ManagedProject> {
    let proposed_currency: Option<String> = row.get(6)?;
    let proposed_budget = match proposed_currency {
        Some(currency) => Some(Budget {
            amount: row.get(5)?,
            currency,
        }),
        None => None,
    };

    Ok(ManagedProject {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        description: row.get(2)?,
        budget: Budget {
            amount: row.get(3)?,
            currency: row.get(4)?,
        },
        proposed_budget,
        status: parse_column::<ProjectStatus>(row, 7)?,
        send_for_approval: row.get(8)?,
        approved_by_finance: row.get(9)?,
        payment_status: parse_column::<PaymentStatus>(row, 10)?,
        created_at: parse_timestamp(row, 11)?,
        updated_at: parse_timestamp(row, 12)?,
        modules: Vec::new(),
    })
}

/// Build a module from a row selected with [`MODULE_COLUMNS`].
pub(super) fn module_from_row(row: &Row) -> rusqlite::Result<ProjectModule> {
    Ok(ProjectModule {
        id: row.get::<_, i64>(0)? as u64,
        project_id: row.get::<_, i64>(1)? as u64,
        name: row.get(2)?,
        description: row.get(3)?,
        deadline: parse_column::<Date>(row, 4)?,
        status: parse_column::<ModuleStatus>(row, 5)?,
        order: row.get::<_, i64>(6)? as u32,
        created_at: parse_timestamp(row, 7)?,
        updated_at: parse_timestamp(row, 8)?,
    })
}

/// Load a project and its modules through any connection or transaction.
pub(super) fn load_project(conn: &Connection, id: u64) -> rusqlite::Result<Option<ManagedProject>> {
    let mut project = conn
        .query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
            params![id as i64],
            project_from_row,
        )
        .optional()?;

    if let Some(ref mut project) = project {
        project.modules = load_modules(conn, project.id)?;
    }

    Ok(project)
}

/// Load a single module.
pub(super) fn load_module(conn: &Connection, id: u64) -> rusqlite::Result<Option<ProjectModule>> {
    conn.query_row(
        &format!("SELECT {MODULE_COLUMNS} FROM project_modules WHERE id = ?1"),
        params![id as i64],
        module_from_row,
    )
    .optional()
}

/// Load the modules of a project in order.
pub(super) fn load_modules(conn: &Connection, project_id: u64) -> rusqlite::Result<Vec<ProjectModule>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MODULE_COLUMNS} FROM project_modules WHERE project_id = ?1 ORDER BY module_order"
    ))?;
    let modules = stmt
        .query_map(params![project_id as i64], module_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(modules)
}
