//! Tests for the async manager facade.

use std::sync::Arc;

use tempfile::TempDir;

use super::*;
use crate::{
    auth::{Actor, AllowAll, RolePolicy, Session},
    error::ErrorKind,
    models::{ActionableFilter, ModuleStatus, PaymentStatus, ProjectStatus},
    params::{
        AddModule, BudgetDecision, CreateProject, DeleteProject, Id, ListProjects,
        SetPaymentStatus, SetStatus, UpdateModule,
    },
};

async fn create_test_manager() -> (TempDir, LifecycleManager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("nested").join("test.db");
    let manager = LifecycleManagerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create manager");
    (temp_dir, manager)
}

fn allow_all() -> SharedAuthorizer {
    Arc::new(AllowAll)
}

fn session(role: &str) -> SharedAuthorizer {
    Arc::new(Session::new(Actor::new("tester", role), RolePolicy::default()))
}

async fn create(manager: &LifecycleManager, name: &str) -> u64 {
    manager
        .create_project(
            &allow_all(),
            &CreateProject {
                name: name.to_string(),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to create project")
        .id
}

#[tokio::test]
async fn test_builder_creates_database_directory() {
    let (temp_dir, manager) = create_test_manager().await;
    assert!(manager.database_path().exists());
    assert!(manager.database_path().starts_with(temp_dir.path()));
}

#[tokio::test]
async fn test_full_workflow_by_role() {
    let (_temp_dir, manager) = create_test_manager().await;
    let pm = session("PROJECT_MANAGER");
    let finance = session("FINANCE");
    let cto = session("CTO");

    let project = manager
        .create_project(
            &pm,
            &CreateProject {
                name: "CRM rollout".to_string(),
                description: Some("Replace the spreadsheet".to_string()),
                budget_amount: None,
                currency: None,
            },
        )
        .await
        .unwrap();
    let id = Id { id: project.id };

    manager
        .request_budget_approval(
            &pm,
            &BudgetDecision {
                id: project.id,
                amount: Some(4200.0),
                currency: None,
            },
        )
        .await
        .unwrap();
    let approved = manager
        .approve_budget(
            &finance,
            &BudgetDecision {
                id: project.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(approved.budget.amount, Some(4200.0));
    assert!(approved.approved_by_finance);
    assert!(!approved.send_for_approval);

    manager
        .transition_status(
            &pm,
            &SetStatus {
                id: project.id,
                status: "COMPLETED".to_string(),
            },
        )
        .await
        .unwrap();
    manager
        .confirm_all_stages_completed(&cto, &id)
        .await
        .unwrap();
    manager
        .set_payment_status(
            &finance,
            &SetPaymentStatus {
                id: project.id,
                payment_status: "RECIEVED".to_string(),
            },
        )
        .await
        .unwrap();

    let closed = manager.close_project(&finance, &id).await.unwrap();
    assert_eq!(closed.status, ProjectStatus::ClosedSuccessfully);
    assert_eq!(closed.payment_status, PaymentStatus::Recieved);
}

#[tokio::test]
async fn test_role_without_grant_is_rejected() {
    let (_temp_dir, manager) = create_test_manager().await;
    let id = create(&manager, "Intranet").await;

    let err = manager
        .close_project(&session("PROJECT_MANAGER"), &Id { id })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = manager
        .create_project(
            &session("EMPLOYEE"),
            &CreateProject {
                name: "Nope".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let project = manager
        .get_project(&session("EMPLOYEE"), &Id { id })
        .await
        .unwrap();
    assert_eq!(project.status, ProjectStatus::Active);
}

#[tokio::test]
async fn test_close_without_payment_keeps_status() {
    let (_temp_dir, manager) = create_test_manager().await;
    let auth = allow_all();
    let id = create(&manager, "Intranet").await;

    manager
        .set_status(
            &auth,
            &SetStatus {
                id,
                status: "COMPLETED".to_string(),
            },
        )
        .await
        .unwrap();
    manager
        .confirm_all_stages_completed(&auth, &Id { id })
        .await
        .unwrap();

    let err = manager.close_project(&auth, &Id { id }).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
    assert!(err.to_string().contains("payment"));

    let project = manager.get_project(&auth, &Id { id }).await.unwrap();
    assert_eq!(project.status, ProjectStatus::AllStagesCompleted);
}

#[tokio::test]
async fn test_list_project_summaries_by_queue() {
    let (_temp_dir, manager) = create_test_manager().await;
    let auth = allow_all();
    let first = create(&manager, "First").await;
    let second = create(&manager, "Second").await;

    manager
        .request_budget_approval(
            &auth,
            &BudgetDecision {
                id: first,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let open = manager
        .list_project_summaries(&auth, &ListProjects::default())
        .await
        .unwrap();
    assert_eq!(open.len(), 2);
    assert_eq!(open[0].id, second);

    let pending = manager
        .list_project_summaries(
            &auth,
            &ListProjects {
                queue: ActionableFilter::PendingApproval,
            },
        )
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].name, "First");
}

#[tokio::test]
async fn test_module_results() {
    let (_temp_dir, manager) = create_test_manager().await;
    let auth = allow_all();
    let project_id = create(&manager, "Intranet").await;

    let created = manager
        .add_module_result(
            &auth,
            &AddModule {
                project_id,
                name: "Search".to_string(),
                description: None,
                deadline: "2026-07-01".to_string(),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.resource.status, ModuleStatus::Todo);
    assert!(created.to_string().contains("Added module with ID"));

    let updated = manager
        .update_module_result(
            &auth,
            &UpdateModule {
                id: created.resource.id,
                status: Some("completed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.changes, vec!["Status: completed".to_string()]);

    let summaries = manager
        .list_project_summaries(&auth, &ListProjects::default())
        .await
        .unwrap();
    assert_eq!(summaries[0].completed_modules, 1);

    let removed = manager
        .remove_module_result(
            &auth,
            &Id {
                id: created.resource.id,
            },
        )
        .await
        .unwrap();
    assert!(removed.to_string().contains("Removed module 'Search'"));
}

#[tokio::test]
async fn test_invalid_module_input_is_rejected_early() {
    let (_temp_dir, manager) = create_test_manager().await;
    let err = manager
        .add_module(
            &allow_all(),
            &AddModule {
                project_id: 1,
                name: "Search".to_string(),
                description: None,
                deadline: "31/12/2026".to_string(),
                status: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_delete_project_result() {
    let (_temp_dir, manager) = create_test_manager().await;
    let auth = allow_all();
    let id = create(&manager, "Intranet").await;

    let err = manager
        .delete_project(
            &auth,
            &DeleteProject {
                id,
                confirmed: false,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let deleted = manager
        .delete_project_result(&auth, &DeleteProject { id, confirmed: true })
        .await
        .unwrap();
    assert!(deleted.to_string().contains("Deleted project 'Intranet'"));

    let err = manager.get_project(&auth, &Id { id }).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_workflow_results_render_changes() {
    let (_temp_dir, manager) = create_test_manager().await;
    let auth = allow_all();
    let id = create(&manager, "Warehouse scanner").await;

    let updated = manager
        .set_status_result(
            &auth,
            &SetStatus {
                id,
                status: "completed".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(updated.to_string().contains("- Status: COMPLETED"));

    let confirmed = manager
        .confirm_all_stages_completed_result(&auth, &Id { id })
        .await
        .unwrap();
    assert!(confirmed
        .to_string()
        .contains("- Status: ALL_STAGES_COMPLETED"));

    let paid = manager
        .set_payment_status_result(
            &auth,
            &SetPaymentStatus {
                id,
                payment_status: "RECIEVED".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(paid.to_string().contains("- Payment: RECIEVED"));

    let closed = manager
        .close_project_result(&auth, &Id { id })
        .await
        .unwrap();
    assert_eq!(
        closed.to_string(),
        format!("Success: Project 'Warehouse scanner' (ID: {id}) closed successfully\n")
    );
}
