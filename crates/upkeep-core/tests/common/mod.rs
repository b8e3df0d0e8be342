#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;
use upkeep_core::{
    params::{CreatePlan, SetTaskStatus},
    Engine, EngineBuilder, EnginePolicy, MaintenancePlan, TaskInstance,
};

/// Helper function to create a test engine pinned at `now`
pub async fn create_test_engine(now: &str) -> (TempDir, Engine) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let engine = engine_at(temp_dir.path(), now).await;
    (temp_dir, engine)
}

/// Opens another engine over the same database, pinned at a different
/// instant. Used to step a scenario through several days.
pub async fn engine_at(dir: &Path, now: &str) -> Engine {
    engine_with_policy(dir, now, EnginePolicy::default()).await
}

pub async fn engine_with_policy(dir: &Path, now: &str, policy: EnginePolicy) -> Engine {
    EngineBuilder::new()
        .with_database_path(Some(dir.join("test.db")))
        .with_policy(policy)
        .with_now(Some(now.parse().expect("valid timestamp")))
        .build()
        .await
        .expect("Failed to create engine")
}

pub async fn create_plan(
    engine: &Engine,
    asset_id: &str,
    frequency: &str,
    start_date: &str,
    tasks: &[&str],
) -> MaintenancePlan {
    engine
        .create_plan(&CreatePlan {
            asset_id: asset_id.to_string(),
            frequency: Some(frequency.to_string()),
            start_date: Some(start_date.to_string()),
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        })
        .await
        .expect("Failed to create plan")
}

pub async fn set_status(engine: &Engine, task: &TaskInstance, status: &str) -> TaskInstance {
    engine
        .set_task_status(&SetTaskStatus {
            id: task.id,
            status: status.to_string(),
        })
        .await
        .expect("Failed to set status")
        .expect("Task should exist")
        .task
}
