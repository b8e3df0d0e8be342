//! Tests for the engine module.

use jiff::Timestamp;
use tempfile::TempDir;

use super::*;
use crate::params::{CreatePlan, DeletePlan, GenerateTasks, Id, ListPlans, SetTaskStatus};

/// Helper function to create a test engine pinned at `now`
async fn create_test_engine(now: &str) -> (TempDir, Engine) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let engine = EngineBuilder::new()
        .with_database_path(Some(&db_path))
        .with_now(Some(now.parse().expect("valid timestamp")))
        .build()
        .await
        .expect("Failed to create engine");
    (temp_dir, engine)
}

fn monthly_plan() -> CreatePlan {
    CreatePlan {
        asset_id: "CHILLER-2".to_string(),
        frequency: Some("monthly".to_string()),
        start_date: Some("2024-01-31".to_string()),
        tasks: vec!["Check refrigerant".to_string()],
    }
}

#[tokio::test]
async fn test_build_creates_database_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("nested").join("upkeep.db");

    let engine = EngineBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create engine");

    assert!(db_path.exists());
    assert_eq!(engine.database_path(), db_path.as_path());
    assert_eq!(engine.policy(), &EnginePolicy::default());
}

#[tokio::test]
async fn test_build_rejects_invalid_policy() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = EngineBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_policy(EnginePolicy {
            sweep_limit: 0,
            ..Default::default()
        })
        .build()
        .await;

    assert!(matches!(
        result,
        Err(UpkeepError::InvalidInput { ref field, .. }) if field == "sweep_limit"
    ));
}

#[tokio::test]
async fn test_pinned_clock_is_truncated() {
    let (_temp_dir, engine) = create_test_engine("2024-03-10T08:30:15.750Z").await;
    let expected: Timestamp = "2024-03-10T08:30:15Z".parse().unwrap();
    assert_eq!(engine.now(), expected);
    assert_eq!(engine.today(), jiff::civil::date(2024, 3, 10));
}

#[tokio::test]
async fn test_create_plan_trims_and_validates() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;

    let plan = engine
        .create_plan(&CreatePlan {
            asset_id: "  CHILLER-2 ".to_string(),
            tasks: vec![" Check refrigerant ".to_string()],
            ..monthly_plan()
        })
        .await
        .expect("Failed to create plan");
    assert_eq!(plan.asset_id, "CHILLER-2");
    assert_eq!(plan.tasks, vec!["Check refrigerant".to_string()]);
    assert!(plan.is_active);

    let bad = engine
        .create_plan(&CreatePlan {
            frequency: Some("fortnightly".to_string()),
            ..monthly_plan()
        })
        .await;
    assert!(matches!(bad, Err(UpkeepError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_month_end_start_clamps_stepwise() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let plan = engine.create_plan(&monthly_plan()).await.unwrap();

    engine
        .generate_tasks(&GenerateTasks {
            plan_id: Some(plan.id),
        })
        .await
        .unwrap();

    let tasks = engine
        .list_tasks(&crate::params::ListTasks {
            plan_id: Some(plan.id),
            ..Default::default()
        })
        .await
        .unwrap();
    let dates: Vec<String> = tasks.iter().take(3).map(|t| t.due_date.to_string()).collect();
    assert_eq!(dates, vec!["2024-01-31", "2024-02-29", "2024-03-29"]);
}

#[tokio::test]
async fn test_deactivated_plan_is_not_generated() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let plan = engine.create_plan(&monthly_plan()).await.unwrap();

    let updated = engine
        .set_plan_active(&Id { id: plan.id }, false)
        .await
        .unwrap()
        .expect("plan exists");
    assert!(!updated.is_active);

    let active = engine.list_plans(&ListPlans::default()).await.unwrap();
    assert!(active.is_empty());
    let all = engine
        .list_plans(&ListPlans {
            include_inactive: true,
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    let report = engine.generate_tasks(&GenerateTasks::default()).await.unwrap();
    assert_eq!(report.plans_scanned, 0);
    assert_eq!(report.created, 0);

    let single = engine
        .generate_tasks(&GenerateTasks {
            plan_id: Some(plan.id),
        })
        .await
        .unwrap();
    assert_eq!(single.skipped.len(), 1);
    assert_eq!(single.skipped[0].reason, crate::models::SkipReason::Inactive);
}

#[tokio::test]
async fn test_generate_unknown_plan_fails() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let result = engine
        .generate_tasks(&GenerateTasks { plan_id: Some(99) })
        .await;
    assert!(matches!(result, Err(UpkeepError::PlanNotFound { id: 99 })));
}

#[tokio::test]
async fn test_delete_plan_requires_confirmation() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let plan = engine.create_plan(&monthly_plan()).await.unwrap();

    let refused = engine
        .delete_plan(&DeletePlan {
            id: plan.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(refused, Err(UpkeepError::InvalidInput { .. })));
    assert!(engine.get_plan(&Id { id: plan.id }).await.unwrap().is_some());

    let missing = engine
        .delete_plan(&DeletePlan {
            id: 404,
            confirmed: true,
        })
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_status_change_on_missing_task_is_noop() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let change = engine
        .set_task_status(&SetTaskStatus {
            id: 12345,
            status: "completed".to_string(),
        })
        .await
        .unwrap();
    assert!(change.is_none());

    let invalid = engine
        .set_task_status(&SetTaskStatus {
            id: 1,
            status: "failed".to_string(),
        })
        .await;
    assert!(matches!(invalid, Err(UpkeepError::InvalidInput { .. })));
}
