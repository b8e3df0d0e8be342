mod common;

use common::{create_plan, create_test_engine, engine_at, engine_with_policy, set_status};
use jiff::civil::date;
use upkeep_core::{
    models::SkipReason,
    params::{
        CreatePlan, DeletePlan, GenerateTasks, Id, ListTasks, RecordWorkOrder, SetTaskStatus,
        ShowChecklist,
    },
    schedule::{next_occurrence, slot_for, WorkOrderTally},
    EnginePolicy, Frequency, TaskStatus, UpkeepError,
};

async fn all_tasks(engine: &upkeep_core::Engine, plan_id: u64) -> Vec<upkeep_core::TaskInstance> {
    engine
        .list_tasks(&ListTasks {
            plan_id: Some(plan_id),
            include_archived: true,
            ..Default::default()
        })
        .await
        .expect("Failed to list tasks")
}

#[tokio::test]
async fn test_weekly_generation_from_past_start() {
    let (_temp_dir, engine) = create_test_engine("2024-01-10T09:00:00Z").await;
    let plan = create_plan(&engine, "AHU-1", "weekly", "2024-01-01", &["Replace filters"]).await;

    let report = engine.generate_tasks(&GenerateTasks::default()).await.unwrap();
    assert_eq!(report.plans_scanned, 1);
    assert!(report.skipped.is_empty());
    assert_eq!(report.created, 52);

    let tasks = all_tasks(&engine, plan.id).await;
    assert_eq!(tasks.len(), 52);
    assert_eq!(tasks[0].due_date, date(2024, 1, 15));
    assert_eq!(tasks[51].due_date, date(2025, 1, 6));
    assert!(tasks.iter().all(|t| t.due_date <= date(2025, 1, 10)));
    assert!(tasks
        .windows(2)
        .all(|w| w[1].due_date == next_occurrence(w[0].due_date, Frequency::Weekly)));
    assert!(tasks
        .iter()
        .all(|t| t.status == TaskStatus::Pending && !t.archived && t.asset_id == "AHU-1"));
}

#[tokio::test]
async fn test_every_frequency_yields_increasing_sequence() {
    let (_temp_dir, engine) = create_test_engine("2024-02-20T00:00:00Z").await;

    for frequency in Frequency::ALL {
        let plan = create_plan(&engine, "RTU-3", frequency.as_str(), "2023-08-31", &["Inspect"]).await;
        engine
            .generate_tasks(&GenerateTasks {
                plan_id: Some(plan.id),
            })
            .await
            .unwrap();

        let tasks = all_tasks(&engine, plan.id).await;
        assert!(!tasks.is_empty(), "{frequency:?} produced nothing");
        assert!(tasks[0].due_date >= date(2024, 2, 20));
        assert!(tasks.iter().all(|t| t.due_date <= date(2025, 2, 19)));
        for pair in tasks.windows(2) {
            assert!(pair[0].due_date < pair[1].due_date);
            assert_eq!(pair[1].due_date, next_occurrence(pair[0].due_date, frequency));
        }
    }
}

#[tokio::test]
async fn test_rerun_generation_writes_nothing_new() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let plan = create_plan(&engine, "PUMP-7", "quarterly", "2024-01-15", &["Grease", "Align"]).await;

    let first = engine.generate_tasks(&GenerateTasks::default()).await.unwrap();
    assert_eq!(first.created, 8);

    let second = engine.generate_tasks(&GenerateTasks::default()).await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.duplicates, 8);
    assert_eq!(all_tasks(&engine, plan.id).await.len(), 8);
}

#[tokio::test]
async fn test_incomplete_plans_are_reported_not_failed() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let good = create_plan(&engine, "AHU-1", "annually", "2024-06-01", &["Service"]).await;
    let no_start = engine
        .create_plan(&CreatePlan {
            asset_id: "AHU-2".to_string(),
            frequency: Some("monthly".to_string()),
            start_date: None,
            tasks: vec!["Service".to_string()],
        })
        .await
        .unwrap();
    let no_frequency = engine
        .create_plan(&CreatePlan {
            asset_id: "AHU-3".to_string(),
            frequency: None,
            start_date: Some("2024-01-01".to_string()),
            tasks: vec!["Service".to_string()],
        })
        .await
        .unwrap();

    let report = engine.generate_tasks(&GenerateTasks::default()).await.unwrap();
    assert_eq!(report.plans_scanned, 3);
    assert_eq!(report.created, 1);
    let reasons: Vec<(u64, SkipReason)> = report.skipped.iter().map(|s| (s.plan_id, s.reason)).collect();
    assert_eq!(
        reasons,
        vec![
            (no_start.id, SkipReason::MissingStartDate),
            (no_frequency.id, SkipReason::MissingFrequency),
        ]
    );
    assert_eq!(all_tasks(&engine, good.id).await[0].due_date, date(2024, 6, 1));
}

#[tokio::test]
async fn test_closing_old_task_archives_it() {
    let (temp_dir, engine) = create_test_engine("2024-06-01T00:00:00Z").await;
    let plan = create_plan(&engine, "BOILER-1", "daily", "2024-06-01", &["Log pressure"]).await;
    engine.generate_tasks(&GenerateTasks::default()).await.unwrap();
    let tasks = all_tasks(&engine, plan.id).await;

    let later = engine_at(temp_dir.path(), "2024-06-21T10:00:00Z").await;

    // Due 2024-06-01, 20 days old
    let old = set_status(&later, &tasks[0], "completed").await;
    assert_eq!(old.status, TaskStatus::Completed);
    assert!(old.archived);
    assert_eq!(old.archived_at, Some("2024-06-21T10:00:00Z".parse().unwrap()));

    // Due 2024-06-16, 5 days old
    let recent = set_status(&later, &tasks[15], "completed").await;
    assert_eq!(recent.due_date, date(2024, 6, 16));
    assert!(!recent.archived);
    assert!(recent.archived_at.is_none());

    // Due 2024-06-07, exactly 14 days old
    let boundary = set_status(&later, &tasks[6], "skipped").await;
    assert!(boundary.archived);
}

#[tokio::test]
async fn test_archive_flag_is_monotonic() {
    let (temp_dir, engine) = create_test_engine("2024-06-01T00:00:00Z").await;
    let plan = create_plan(&engine, "BOILER-1", "daily", "2024-06-01", &["Log pressure"]).await;
    engine.generate_tasks(&GenerateTasks::default()).await.unwrap();
    let task = all_tasks(&engine, plan.id).await.remove(0);

    let later = engine_at(temp_dir.path(), "2024-07-01T00:00:00Z").await;
    let archived = set_status(&later, &task, "completed").await;
    assert!(archived.archived);

    // Re-applying the same status changes nothing
    let again = later
        .set_task_status(&SetTaskStatus {
            id: task.id,
            status: "completed".to_string(),
        })
        .await
        .unwrap()
        .unwrap();
    assert!(!again.archived_now);
    assert_eq!(again.task.archived_at, archived.archived_at);

    // Reopening is rejected and leaves the archive in place
    let reopen = later
        .set_task_status(&SetTaskStatus {
            id: task.id,
            status: "pending".to_string(),
        })
        .await;
    assert!(matches!(
        reopen,
        Err(UpkeepError::InvalidTransition {
            from: TaskStatus::Completed,
            to: TaskStatus::Pending,
            ..
        })
    ));

    let stored = later.get_task(&Id { id: task.id }).await.unwrap().unwrap();
    assert!(stored.archived);
    assert_eq!(stored.status, TaskStatus::Completed);

    // Archived instances are hidden from default listings
    let visible = later
        .list_tasks(&ListTasks {
            plan_id: Some(plan.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(visible.iter().all(|t| t.id != task.id));
}

#[tokio::test]
async fn test_retention_sweep_is_bounded_per_run() {
    let (temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let plan = create_plan(&engine, "CT-1", "daily", "2024-01-01", &["Check basin"]).await;
    let report = engine.generate_tasks(&GenerateTasks::default()).await.unwrap();
    assert_eq!(report.created, 366);

    // Close the 150 oldest on 2024-07-01; all are at least 33 days old
    let closer = engine_at(temp_dir.path(), "2024-07-01T00:00:00Z").await;
    let tasks = all_tasks(&closer, plan.id).await;
    for task in tasks.iter().take(150) {
        assert!(set_status(&closer, task, "completed").await.archived);
    }

    // Still inside the retention window
    let early = engine_at(temp_dir.path(), "2024-07-10T12:00:00Z").await;
    let none = early.sweep_retention().await.unwrap();
    assert_eq!((none.deleted, none.remaining), (0, 0));

    let day_one = engine_at(temp_dir.path(), "2024-07-15T12:00:00Z").await;
    let first = day_one.sweep_retention().await.unwrap();
    assert_eq!(first.deleted, 100);
    assert_eq!(first.remaining, 50);

    let day_two = engine_at(temp_dir.path(), "2024-07-16T12:00:00Z").await;
    let second = day_two.sweep_retention().await.unwrap();
    assert_eq!(second.deleted, 50);
    assert_eq!(second.remaining, 0);

    let third = day_two.sweep_retention().await.unwrap();
    assert_eq!(third.deleted, 0);

    let left = all_tasks(&day_two, plan.id).await;
    assert_eq!(left.len(), 216);
    assert!(left.iter().all(|t| !t.archived));
}

#[tokio::test]
async fn test_sweep_limit_comes_from_policy() {
    let policy = EnginePolicy {
        sweep_limit: 3,
        retention_days: 0,
        ..Default::default()
    };
    let (temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let plan = create_plan(&engine, "CT-1", "daily", "2024-01-01", &["Check basin"]).await;
    engine.generate_tasks(&GenerateTasks::default()).await.unwrap();

    let closer = engine_at(temp_dir.path(), "2024-03-01T00:00:00Z").await;
    for task in all_tasks(&closer, plan.id).await.iter().take(5) {
        set_status(&closer, task, "skipped").await;
    }

    let sweeper = engine_with_policy(temp_dir.path(), "2024-03-01T00:00:01Z", policy).await;
    let report = sweeper.sweep_retention().await.unwrap();
    assert_eq!((report.deleted, report.remaining), (3, 2));
}

#[tokio::test]
async fn test_delete_plan_cascades_only_its_instances() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let doomed = create_plan(&engine, "AHU-1", "monthly", "2024-01-01", &["Filters", "Belts"]).await;
    let kept = create_plan(&engine, "AHU-2", "monthly", "2024-01-01", &["Filters"]).await;
    engine.generate_tasks(&GenerateTasks::default()).await.unwrap();

    let kept_before = all_tasks(&engine, kept.id).await;
    let doomed_count = all_tasks(&engine, doomed.id).await.len();
    assert_eq!(doomed_count, 24);

    let deletion = engine
        .delete_plan(&DeletePlan {
            id: doomed.id,
            confirmed: true,
        })
        .await
        .unwrap()
        .expect("plan existed");
    assert_eq!(deletion.plan.id, doomed.id);
    assert_eq!(deletion.removed_tasks, doomed_count);

    assert!(all_tasks(&engine, doomed.id).await.is_empty());
    assert!(engine.get_plan(&Id { id: doomed.id }).await.unwrap().is_none());
    assert_eq!(all_tasks(&engine, kept.id).await, kept_before);
}

#[tokio::test]
async fn test_cascade_delete_for_removed_plan() {
    let (temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let plan = create_plan(&engine, "AHU-1", "monthly", "2024-01-01", &["Filters"]).await;
    engine.generate_tasks(&GenerateTasks::default()).await.unwrap();

    // Live plans go through delete_plan
    let refused = engine.cascade_delete(&Id { id: plan.id }).await;
    assert!(matches!(refused, Err(UpkeepError::InvalidInput { .. })));

    // Another writer removes the plan row only
    {
        let conn = rusqlite::Connection::open(temp_dir.path().join("test.db")).unwrap();
        conn.execute("DELETE FROM plan_tasks WHERE plan_id = ?1", [plan.id as i64])
            .unwrap();
        conn.execute("DELETE FROM maintenance_plans WHERE id = ?1", [plan.id as i64])
            .unwrap();
    }

    let removed = engine.cascade_delete(&Id { id: plan.id }).await.unwrap();
    assert_eq!(removed, 12);
    assert!(all_tasks(&engine, plan.id).await.is_empty());

    // Nothing left to do is not an error
    assert_eq!(engine.cascade_delete(&Id { id: plan.id }).await.unwrap(), 0);
}

#[tokio::test]
async fn test_checklist_columns_match_due_dates() {
    let (_temp_dir, engine) = create_test_engine("2024-01-01T00:00:00Z").await;
    let plan = create_plan(&engine, "AHU-1", "quarterly", "2024-01-15", &["Filters", "Belts"]).await;
    engine.generate_tasks(&GenerateTasks::default()).await.unwrap();

    let checklist = engine
        .checklist(&ShowChecklist {
            plan_id: plan.id,
            year: Some(2024),
        })
        .await
        .unwrap();
    assert_eq!(checklist.columns, vec!["Q1", "Q2", "Q3", "Q4"]);
    assert_eq!(checklist.rows.len(), 2);
    assert_eq!(checklist.rows[0].task_description, "Filters");

    for row in &checklist.rows {
        for (column, cell) in row.cells.iter().enumerate() {
            assert_eq!(cell.len(), 1);
            assert_eq!(slot_for(cell[0].due_date, Frequency::Quarterly), column);
        }
    }

    let missing = engine
        .checklist(&ShowChecklist {
            plan_id: 999,
            year: None,
        })
        .await;
    assert!(matches!(missing, Err(UpkeepError::PlanNotFound { id: 999 })));
}

fn work_order(status: &str, due_date: Option<&str>) -> RecordWorkOrder {
    RecordWorkOrder {
        id: None,
        title: None,
        status: status.to_string(),
        due_date: due_date.map(str::to_string),
    }
}

#[tokio::test]
async fn test_stats_match_manual_tally() {
    let (_temp_dir, engine) = create_test_engine("2024-06-15T12:00:00Z").await;

    for params in [
        work_order("Completed", Some("2024-01-01")),
        work_order("Scheduled", Some("2024-12-01")),
        work_order("Pending", Some("2024-06-01")),
        work_order("In Progress", None),
    ] {
        engine.record_work_order(&params).await.unwrap();
    }

    let snapshot = engine.stats().await.unwrap().expect("snapshot written");
    assert_eq!(snapshot.total_work_orders, 4);
    assert_eq!(snapshot.completed_work_orders, 1);
    assert_eq!(snapshot.open_work_orders, 3);
    assert_eq!(snapshot.overdue_work_orders, 1);
    assert_eq!(snapshot.scheduled_work_orders, 1);
    assert_eq!(snapshot.pending_work_orders, 1);
    assert_eq!(snapshot.in_progress_work_orders, 1);
    assert_eq!(snapshot.completion_rate, 25);
    assert_eq!(snapshot.overdue_rate, 33);
    assert_eq!(snapshot.last_updated, engine.now());
}

#[tokio::test]
async fn test_stats_paging_and_counters() {
    let policy = EnginePolicy {
        stats_page_size: 2,
        ..Default::default()
    };
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let engine = engine_with_policy(temp_dir.path(), "2024-06-15T12:00:00Z", policy).await;

    let mut orders = Vec::new();
    for params in [
        work_order("completed", None),
        work_order("OPEN", Some("2024-06-15T11:59:59Z")),
        work_order("on hold", Some("next tuesday")),
        work_order("scheduled", Some("2024-06-16")),
        work_order("pending", Some("2024-06-15T13:00:00")),
    ] {
        orders.push(engine.record_work_order(&params).await.unwrap());
    }
    engine
        .add_user(&upkeep_core::AddUser {
            name: "Dana".to_string(),
        })
        .await
        .unwrap();
    let plan = create_plan(&engine, "AHU-1", "annually", "2024-07-01", &["Service"]).await;
    engine
        .generate_tasks(&GenerateTasks {
            plan_id: Some(plan.id),
        })
        .await
        .unwrap();

    let snapshot = engine.recompute_stats().await.unwrap();
    let manual = WorkOrderTally::from_orders(&orders, engine.now());
    assert_eq!(snapshot.total_work_orders, 5);
    assert_eq!(snapshot.open_work_orders, manual.open);
    assert_eq!(snapshot.overdue_work_orders, 1);
    assert_eq!(snapshot.total_users, 1);
    assert_eq!(snapshot.total_task_instances, 1);
    assert_eq!(engine.stats().await.unwrap(), Some(snapshot));
}

#[tokio::test]
async fn test_updating_work_order_refreshes_stats() {
    let (temp_dir, engine) = create_test_engine("2024-06-15T12:00:00Z").await;
    let order = engine
        .record_work_order(&work_order("Pending", Some("2024-06-01")))
        .await
        .unwrap();
    let before = engine.stats().await.unwrap().unwrap();
    assert_eq!(before.overdue_work_orders, 1);

    let later = engine_at(temp_dir.path(), "2024-06-16T08:00:00Z").await;
    let updated = later
        .record_work_order(&RecordWorkOrder {
            id: Some(order.id),
            status: "Completed".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.id, order.id);
    assert_eq!(updated.due_date.as_deref(), Some("2024-06-01"));

    let after = later.stats().await.unwrap().unwrap();
    assert_eq!(after.total_work_orders, 1);
    assert_eq!(after.completed_work_orders, 1);
    assert_eq!(after.overdue_work_orders, 0);
    assert_eq!(after.completion_rate, 100);
    assert!(after.last_updated > before.last_updated);
}

#[tokio::test]
async fn test_work_order_ids_outside_rowid_range_are_rejected() {
    let (_temp_dir, engine) = create_test_engine("2024-06-15T12:00:00Z").await;

    for id in [0, i64::MAX as u64 + 1, u64::MAX] {
        let result = engine
            .record_work_order(&RecordWorkOrder {
                id: Some(id),
                ..work_order("Pending", Some("2024-06-01"))
            })
            .await;
        assert!(
            matches!(result, Err(UpkeepError::InvalidInput { ref field, .. }) if field == "id"),
            "id {id} was accepted"
        );
    }
    assert!(engine.stats().await.unwrap().is_none());

    engine
        .record_work_order(&work_order("Scheduled", Some("2024-12-01")))
        .await
        .unwrap();
    let highest = engine
        .record_work_order(&RecordWorkOrder {
            id: Some(i64::MAX as u64),
            ..work_order("Completed", None)
        })
        .await
        .unwrap();
    assert_eq!(highest.id, i64::MAX as u64);

    let snapshot = engine.recompute_stats().await.unwrap();
    assert_eq!(snapshot.total_work_orders, 2);
    assert_eq!(snapshot.completed_work_orders, 1);
    assert_eq!(snapshot.scheduled_work_orders, 1);
}

#[tokio::test]
async fn test_blank_work_order_status_is_rejected() {
    let (_temp_dir, engine) = create_test_engine("2024-06-15T12:00:00Z").await;
    let result = engine.record_work_order(&work_order("  ", None)).await;
    assert!(matches!(result, Err(UpkeepError::InvalidInput { .. })));
    assert!(engine.stats().await.unwrap().is_none());
}
