use jiff::Timestamp;

use super::*;
use crate::error::{ErrorKind, LifecycleError};

fn sample_project(status: ProjectStatus) -> ManagedProject {
    ManagedProject {
        id: 42,
        name: "Warehouse migration".to_string(),
        description: Some("Move stock system to the new site".to_string()),
        budget: Budget::new(Some(12_500.0), None),
        proposed_budget: None,
        status,
        send_for_approval: false,
        approved_by_finance: false,
        payment_status: PaymentStatus::Pending,
        created_at: Timestamp::from_second(1640995200).unwrap(),
        updated_at: Timestamp::from_second(1641081600).unwrap(),
        modules: vec![],
    }
}

#[test]
fn test_project_status_round_trips_through_strings() {
    for status in ProjectStatus::ALL {
        assert_eq!(status.as_str().parse::<ProjectStatus>(), Ok(status));
    }
    assert_eq!(
        "all_stages_completed".parse::<ProjectStatus>(),
        Ok(ProjectStatus::AllStagesCompleted)
    );
}

#[test]
fn test_project_status_rejects_unknown_values() {
    let err = ProjectStatus::parse("NOT_A_REAL_STATUS").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStatus);
    assert!(err.to_string().contains("NOT_A_REAL_STATUS"));
    assert!(err.to_string().contains("CLOSED_SUCCESSFULLY"));
}

#[test]
fn test_payment_status_keeps_wire_spelling() {
    assert_eq!(PaymentStatus::Recieved.as_str(), "RECIEVED");
    assert_eq!(
        serde_json::to_string(&PaymentStatus::NotRecieved).unwrap(),
        "\"NOT_RECIEVED\""
    );
    assert_eq!(
        PaymentStatus::parse("recieved").unwrap(),
        PaymentStatus::Recieved
    );
    assert!(matches!(
        PaymentStatus::parse("RECEIVED"),
        Err(LifecycleError::InvalidStatus { .. })
    ));
}

#[test]
fn test_project_status_serializes_screaming_snake_case() {
    assert_eq!(
        serde_json::to_string(&ProjectStatus::ClosedSuccessfully).unwrap(),
        "\"CLOSED_SUCCESSFULLY\""
    );
    let parsed: ProjectStatus = serde_json::from_str("\"ALL_STAGES_COMPLETED\"").unwrap();
    assert_eq!(parsed, ProjectStatus::AllStagesCompleted);
}

#[test]
fn test_transition_table_never_reaches_guarded_targets() {
    for from in ProjectStatus::ALL {
        for to in from.allowed_targets() {
            assert!(!to.is_guarded_target(), "{from} -> {to} bypasses its operation");
        }
    }
    assert!(ProjectStatus::ClosedSuccessfully.allowed_targets().is_empty());
}

#[test]
fn test_module_status_parsing() {
    assert_eq!(ModuleStatus::parse("todo").unwrap(), ModuleStatus::Todo);
    assert_eq!(
        ModuleStatus::parse("in_progress").unwrap(),
        ModuleStatus::InProgress
    );
    assert_eq!(
        ModuleStatus::parse("COMPLETED").unwrap(),
        ModuleStatus::Completed
    );
    assert!(ModuleStatus::parse("done").is_err());
}

#[test]
fn test_budget_validation() {
    assert!(Budget::new(Some(10.0), None).validate().is_ok());
    assert!(Budget::new(None, Some("gbp".to_string())).validate().is_ok());
    assert!(Budget::new(Some(-1.0), None).validate().is_err());
    assert!(Budget::new(Some(f64::NAN), None).validate().is_err());
    assert!(Budget::new(Some(1.0), Some("  ".to_string())).validate().is_err());
}

#[test]
fn test_budget_currency_defaults_when_missing_from_json() {
    let budget: Budget = serde_json::from_str(r#"{"amount": 250.5}"#).unwrap();
    assert_eq!(budget.amount, Some(250.5));
    assert_eq!(budget.currency, DEFAULT_CURRENCY);
}

#[test]
fn test_pending_approval_filter_excludes_approved_and_cancelled() {
    let filter = ProjectFilter::from(ActionableFilter::PendingApproval);

    let mut waiting = sample_project(ProjectStatus::Active);
    waiting.send_for_approval = true;
    assert!(filter.matches(&waiting));

    let mut approved = waiting.clone();
    approved.approved_by_finance = true;
    assert!(!filter.matches(&approved));

    let mut cancelled = waiting.clone();
    cancelled.status = ProjectStatus::Cancelled;
    assert!(!filter.matches(&cancelled));
}

#[test]
fn test_queue_filters() {
    let open = ProjectFilter::from(ActionableFilter::Open);
    let payment = ProjectFilter::from(ActionableFilter::PaymentQueue);
    let completion = ProjectFilter::from(ActionableFilter::CompletionQueue);
    let all = ProjectFilter::from(ActionableFilter::All);

    let closed = sample_project(ProjectStatus::ClosedSuccessfully);
    let confirmed = sample_project(ProjectStatus::AllStagesCompleted);
    let completed = sample_project(ProjectStatus::Completed);

    assert!(!open.matches(&closed));
    assert!(open.matches(&confirmed));
    assert!(all.matches(&closed));

    assert!(payment.matches(&confirmed));
    assert!(!payment.matches(&completed));

    assert!(completion.matches(&confirmed));
    assert!(completion.matches(&completed));
    assert!(!completion.matches(&closed));
}

#[test]
fn test_actionable_filter_parsing() {
    assert_eq!(
        "pending-approval".parse::<ActionableFilter>(),
        Ok(ActionableFilter::PendingApproval)
    );
    assert_eq!("ALL".parse::<ActionableFilter>(), Ok(ActionableFilter::All));
    assert!("closed".parse::<ActionableFilter>().is_err());
}

#[test]
fn test_update_guard_matching() {
    let mut project = sample_project(ProjectStatus::AllStagesCompleted);
    let guard = UpdateGuard::status(ProjectStatus::AllStagesCompleted)
        .with_payment(PaymentStatus::Recieved);
    assert!(!guard.matches(&project));

    project.payment_status = PaymentStatus::Recieved;
    assert!(guard.matches(&project));
    assert!(UpdateGuard::none().matches(&project));
}

#[test]
fn test_approval_guard_tracks_staged_proposal() {
    let mut project = sample_project(ProjectStatus::Active);
    project.send_for_approval = true;
    project.proposed_budget = Some(Budget::new(Some(1000.0), None));
    let guard = UpdateGuard::approval_of(&project);
    assert!(guard.matches(&project));

    project.proposed_budget = Some(Budget::new(Some(9000.0), None));
    assert!(!guard.matches(&project));

    project.proposed_budget = None;
    assert!(!guard.matches(&project));
}

#[test]
fn test_project_update_applies_only_listed_fields() {
    let mut project = sample_project(ProjectStatus::Active);
    project.proposed_budget = Some(Budget::new(Some(1.0), None));
    let now = Timestamp::from_second(1700000000).unwrap();

    let update = ProjectUpdate {
        approved_by_finance: Some(true),
        send_for_approval: Some(false),
        proposed_budget: Some(None),
        ..Default::default()
    };
    update.apply_to(&mut project, now);

    assert!(project.approved_by_finance);
    assert_eq!(project.proposed_budget, None);
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(project.budget.amount, Some(12_500.0));
    assert_eq!(project.updated_at, now);
}

#[test]
fn test_summary_counts_completed_modules() {
    let mut project = sample_project(ProjectStatus::Active);
    let module = ProjectModule {
        id: 1,
        project_id: 42,
        name: "Inventory export".to_string(),
        description: None,
        deadline: jiff::civil::date(2025, 3, 1),
        status: ModuleStatus::Completed,
        order: 0,
        created_at: project.created_at,
        updated_at: project.updated_at,
    };
    let mut second = module.clone();
    second.id = 2;
    second.status = ModuleStatus::InProgress;
    project.modules = vec![module, second];

    let summary = ProjectSummary::from(&project);
    assert_eq!(summary.total_modules, 2);
    assert_eq!(summary.completed_modules, 1);
}
