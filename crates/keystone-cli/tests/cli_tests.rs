use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// A `keystone` command against `db_path`, in plain output, acting as `role`.
fn keystone_cmd(db_path: &Path, role: &str) -> Command {
    let mut cmd = Command::cargo_bin("keystone").expect("Failed to find keystone binary");
    cmd.env_remove("KEYSTONE_ACTOR")
        .env_remove("KEYSTONE_ROLE")
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .arg("--role")
        .arg(role);
    cmd
}

fn run_ok(db_path: &Path, role: &str, args: &[&str]) {
    keystone_cmd(db_path, role).args(args).assert().success();
}

#[test]
fn test_cli_create_project() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    keystone_cmd(&db_path, "CEO")
        .args([
            "project",
            "create",
            "Website relaunch",
            "--description",
            "New marketing site",
            "--budget",
            "5000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project with ID: 1"))
        .stdout(predicate::str::contains("# 1. Website relaunch"))
        .stdout(predicate::str::contains("- Status: ACTIVE"))
        .stdout(predicate::str::contains("- Budget: 5000.00 USD"))
        .stdout(predicate::str::contains("New marketing site"));
}

#[test]
fn test_cli_default_lists_open_projects() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    keystone_cmd(&db_path, "CEO")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Open Projects"))
        .stdout(predicate::str::contains("No projects found."));

    run_ok(&db_path, "CEO", &["project", "create", "Intranet"]);
    run_ok(&db_path, "CEO", &["project", "create", "Helpdesk"]);

    keystone_cmd(&db_path, "EMPLOYEE")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Helpdesk (ID: 2)"))
        .stdout(predicate::str::contains("## Intranet (ID: 1)"));
}

#[test]
fn test_cli_full_lifecycle_by_role() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(&db_path, "PROJECT_MANAGER", &["project", "create", "Payroll export"]);
    keystone_cmd(&db_path, "PROJECT_MANAGER")
        .args(["project", "request-approval", "1", "--amount", "1200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sent for finance approval"))
        .stdout(predicate::str::contains("- Approval: Awaiting finance"));

    keystone_cmd(&db_path, "FINANCE")
        .args(["project", "list", "--queue", "pending-approval"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Awaiting Finance Approval"))
        .stdout(predicate::str::contains("Payroll export"));

    keystone_cmd(&db_path, "FINANCE")
        .args(["project", "approve", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget approved at 1200.00 USD"))
        .stdout(predicate::str::contains("- Approval: Approved by finance"));

    run_ok(
        &db_path,
        "PROJECT_MANAGER",
        &["module", "add", "1", "Mapping", "--deadline", "2026-11-30"],
    );
    run_ok(&db_path, "CTO", &["module", "update", "1", "--status", "completed"]);
    run_ok(&db_path, "CTO", &["project", "transition", "1", "COMPLETED"]);
    run_ok(&db_path, "CTO", &["project", "confirm-stages", "1"]);

    keystone_cmd(&db_path, "FINANCE")
        .args(["project", "list", "--queue", "payment-queue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payroll export"));

    run_ok(&db_path, "FINANCE", &["project", "set-payment", "1", "RECIEVED"]);

    keystone_cmd(&db_path, "FINANCE")
        .args(["project", "close", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Project 'Payroll export' (ID: 1) closed successfully",
        ));

    keystone_cmd(&db_path, "EMPLOYEE")
        .args(["project", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Status: CLOSED_SUCCESSFULLY"))
        .stdout(predicate::str::contains("### 1. Mapping (✓ Completed)"));

    keystone_cmd(&db_path, "EMPLOYEE")
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));
}

#[test]
fn test_cli_close_without_payment_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(&db_path, "CEO", &["project", "create", "Kiosk"]);
    run_ok(&db_path, "CEO", &["project", "transition", "1", "COMPLETED"]);
    run_ok(&db_path, "CEO", &["project", "confirm-stages", "1"]);

    keystone_cmd(&db_path, "CEO")
        .args(["project", "close", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to close project"))
        .stderr(predicate::str::contains(
            "payment not received: payment status is PENDING",
        ));

    keystone_cmd(&db_path, "CEO")
        .args(["project", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Status: ALL_STAGES_COMPLETED"));
}

#[test]
fn test_cli_close_before_confirmation_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(&db_path, "CEO", &["project", "create", "Kiosk"]);
    run_ok(&db_path, "CEO", &["project", "set-payment", "1", "RECIEVED"]);

    keystone_cmd(&db_path, "CEO")
        .args(["project", "close", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "completion not confirmed: status is ACTIVE",
        ));
}

#[test]
fn test_cli_role_is_enforced() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    keystone_cmd(&db_path, "EMPLOYEE")
        .args(["project", "create", "Shadow IT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not allowed to project:create"));

    run_ok(&db_path, "CEO", &["project", "create", "Kiosk"]);
    run_ok(&db_path, "CEO", &["project", "transition", "1", "COMPLETED"]);

    keystone_cmd(&db_path, "FINANCE")
        .args(["project", "confirm-stages", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "is not allowed to status:confirm_stages",
        ));
}

#[test]
fn test_cli_role_from_environment() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let mut cmd = Command::cargo_bin("keystone").expect("Failed to find keystone binary");
    cmd.env("KEYSTONE_ROLE", "EMPLOYEE")
        .env("KEYSTONE_ACTOR", "eli")
        .args(["--no-color", "--database-file"])
        .arg(&db_path)
        .args(["project", "create", "Side project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Actor 'eli' is not allowed"));
}

#[test]
fn test_cli_unknown_role_is_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    keystone_cmd(&db_path, "INTERN")
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown role 'INTERN'"))
        .stderr(predicate::str::contains(
            "CEO, CTO, EMPLOYEE, FINANCE, PROJECT_MANAGER",
        ));

    // Role names are matched case-insensitively.
    keystone_cmd(&db_path, "finance")
        .args(["project", "list"])
        .assert()
        .success();
}

#[test]
fn test_cli_grant_extends_role() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(&db_path, "CEO", &["project", "create", "Kiosk"]);

    keystone_cmd(&db_path, "EMPLOYEE")
        .args(["project", "set-payment", "1", "RECIEVED"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not allowed to payment:set"));

    keystone_cmd(&db_path, "EMPLOYEE")
        .args(["--grant", "payment:set", "project", "set-payment", "1", "RECIEVED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Payment: RECIEVED"));

    keystone_cmd(&db_path, "EMPLOYEE")
        .args(["--grant", "payment:everything", "project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown permission: payment:everything"));
}

#[test]
fn test_cli_invalid_status() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(&db_path, "CEO", &["project", "create", "Kiosk"]);

    keystone_cmd(&db_path, "CEO")
        .args(["project", "set-status", "1", "FINISHED"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status 'FINISHED'"));

    keystone_cmd(&db_path, "CEO")
        .args(["project", "set-status", "1", "CLOSED_SUCCESSFULLY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("use close_project"));

    keystone_cmd(&db_path, "CEO")
        .args(["project", "set-payment", "1", "PAID"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid payment status 'PAID'"));
}

#[test]
fn test_cli_transition_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(&db_path, "CEO", &["project", "create", "Kiosk"]);
    run_ok(&db_path, "CEO", &["project", "transition", "1", "CANCELLED"]);

    keystone_cmd(&db_path, "CEO")
        .args(["project", "transition", "1", "COMPLETED"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot move project 1 from CANCELLED"));

    // The permissive write still goes through.
    keystone_cmd(&db_path, "CEO")
        .args(["project", "set-status", "1", "COMPLETED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Status: COMPLETED"));
}

#[test]
fn test_cli_missing_project() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    keystone_cmd(&db_path, "CEO")
        .args(["project", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project with ID 99 not found"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(&db_path, "CEO", &["project", "create", "Intranet"]);
    run_ok(
        &db_path,
        "CEO",
        &["module", "add", "1", "Search", "--deadline", "2026-12-31"],
    );

    keystone_cmd(&db_path, "CEO")
        .args(["project", "delete", "1"])
        .assert()
        .failure();

    keystone_cmd(&db_path, "CEO")
        .args(["project", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted project 'Intranet' (ID: 1) and 1 module(s)",
        ));
}

#[test]
fn test_cli_module_commands() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(&db_path, "CEO", &["project", "create", "Intranet"]);

    keystone_cmd(&db_path, "CEO")
        .args(["module", "add", "1", "Search", "--deadline", "2026-12-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added module with ID: 1 to project 1"))
        .stdout(predicate::str::contains("### 1. Search (○ Todo)"));

    keystone_cmd(&db_path, "CEO")
        .args(["module", "add", "1", "Wiki", "--deadline", "31/12/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deadline"));

    keystone_cmd(&db_path, "CEO")
        .args(["module", "update", "1", "--status", "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: inprogress"));

    keystone_cmd(&db_path, "CEO")
        .args(["module", "remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Removed module 'Search' (ID: 1) from project 1",
        ));
}
