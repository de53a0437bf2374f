// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end todo lifecycle workflow tests.
//!
//! These tests validate complete workflows from todo creation through
//! modification and completion, ensuring proper coordination between
//! configuration defaults, status transitions, and data persistence.

use calcli_core::{
    Calcli, Id, Pager, Priority, SortOrder, Todo, TodoConditions, TodoDraft, TodoPatch, TodoSort,
    TodoSortKey, TodoStatus,
};
use chrono::Duration;

use crate::common::{setup_temp_dirs, test_config, test_todo_draft};

#[tokio::test]
async fn todo_lifecycle_create_with_config_defaults() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    config.default_due = Some(Duration::days(7).into());
    config.default_priority = Priority::P2;
    let mut calcli = Calcli::new(config).await.unwrap();

    // Create todo without explicit due/priority
    let todo = calcli
        .new_todo(test_todo_draft("Task with defaults"), None)
        .await
        .unwrap();

    assert_eq!(todo.summary(), "Task with defaults");
    assert_eq!(todo.priority(), Priority::P2);
    assert!(
        todo.due().is_some(),
        "Due date should be applied from config default"
    );
}

#[tokio::test]
async fn todo_lifecycle_status_evolution() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();

    let todo = calcli
        .new_todo(test_todo_draft("Workflow Task"), None)
        .await
        .unwrap();
    let id = Id::Uid(todo.uid().to_string());

    assert_eq!(todo.status(), Some(TodoStatus::NeedsAction));
    assert!(todo.completed().is_none());

    let patch = TodoPatch {
        status: Some(TodoStatus::InProcess),
        ..Default::default()
    };
    let updated = calcli.update_todo(&id, &patch).await.unwrap();
    assert_eq!(updated.status(), Some(TodoStatus::InProcess));
    assert!(updated.completed().is_none());

    let patch = TodoPatch {
        status: Some(TodoStatus::Completed),
        ..Default::default()
    };
    let updated = calcli.update_todo(&id, &patch).await.unwrap();
    assert_eq!(updated.status(), Some(TodoStatus::Completed));
    assert!(
        updated.completed().is_some(),
        "Completed timestamp should be set"
    );
    assert_eq!(updated.percent_complete(), Some(100));

    // Undo brings it back to needing action
    let patch = TodoPatch {
        status: Some(TodoStatus::NeedsAction),
        ..Default::default()
    };
    let reopened = calcli.update_todo(&id, &patch).await.unwrap();
    assert_eq!(reopened.status(), Some(TodoStatus::NeedsAction));
    assert!(reopened.completed().is_none());
}

#[tokio::test]
async fn todo_lifecycle_list_sorted_and_filtered() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();
    let now = calcli.now();

    for (summary, due_days, priority) in [
        ("late", 9, Priority::P9),
        ("urgent", 1, Priority::P1),
        ("whenever", 5, Priority::None),
    ] {
        let draft = TodoDraft {
            summary: summary.to_string(),
            due: Some((now + Duration::days(due_days)).into()),
            priority: Some(priority),
            ..Default::default()
        };
        calcli.new_todo(draft, None).await.unwrap();
    }

    let conds = TodoConditions {
        status: Some(TodoStatus::NeedsAction),
        due: None,
    };
    let sorts = [
        TodoSort::from((TodoSortKey::Priority, SortOrder::Asc)),
        TodoSort::from((TodoSortKey::Due, SortOrder::Asc)),
    ];
    let todos = calcli.list_todos(&conds, &sorts, &Pager {
        limit: 10,
        offset: 0,
    });
    let summaries: Vec<_> = todos.iter().map(|a| a.summary().to_string()).collect();
    assert_eq!(summaries, ["urgent", "late", "whenever"]);

    // Completed todos drop out of the needs-action view
    let id = Id::Uid(todos[0].uid().to_string());
    let patch = TodoPatch {
        status: Some(TodoStatus::Completed),
        ..Default::default()
    };
    calcli.update_todo(&id, &patch).await.unwrap();
    assert_eq!(calcli.count_todos(&conds), 2);

    // Due filter keeps only tasks due soon, plus those with no due date
    let conds = TodoConditions {
        status: Some(TodoStatus::NeedsAction),
        due: Some(calcli_core::DateTimeAnchor::InDays(6)),
    };
    let todos = calcli.list_todos(&conds, &sorts, &(10, 0).into());
    let summaries: Vec<_> = todos.iter().map(|a| a.summary().to_string()).collect();
    assert_eq!(summaries, ["whenever"]);
}

#[tokio::test]
async fn todo_lifecycle_short_id_resolution() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();

    let todo = calcli
        .new_todo(test_todo_draft("Numbered"), None)
        .await
        .unwrap();
    let short_id = todo.short_id.to_string();
    let uid = todo.uid().to_string();

    let by_short = calcli.get_todo(&Id::ShortIdOrUid(short_id)).unwrap();
    assert_eq!(by_short.uid(), uid);

    calcli.close().await.unwrap();
}
