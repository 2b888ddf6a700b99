use std::sync::Arc;

use keystone_core::{
    auth::{Actor, AllowAll, RolePolicy, Session, SharedAuthorizer},
    LifecycleManager, LifecycleManagerBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test manager backed by a temporary database
pub async fn create_test_manager() -> (TempDir, LifecycleManager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let manager = LifecycleManagerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create manager");
    (temp_dir, manager)
}

#[allow(dead_code)]
pub fn allow_all() -> SharedAuthorizer {
    Arc::new(AllowAll)
}

#[allow(dead_code)]
pub fn as_role(name: &str, role: &str) -> SharedAuthorizer {
    Arc::new(Session::new(Actor::new(name, role), RolePolicy::default()))
}
