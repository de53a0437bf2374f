// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workflow tests for coordination with externally-managed vdir files.
//!
//! calcli shares its vdir tree with khal and vdirsyncer: files written by
//! other tools must be picked up on the next run, and files written by calcli
//! must remain one component per file.

use calcli_core::{Calcli, Event, Id, Todo};
use tokio::fs;

use crate::common::{sample_event_ics, sample_todo_ics, setup_temp_dirs, test_config, test_todo_draft};

#[tokio::test]
async fn file_sync_picks_up_external_files() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    temp_dirs
        .create_ics_file(
            "personal",
            "ext-event",
            &sample_event_ics("ext-event", "Synced meeting", "20250115"),
        )
        .await
        .unwrap();
    temp_dirs
        .create_ics_file(
            "personal",
            "ext-todo",
            &sample_todo_ics("ext-todo", "Synced task", "20250116"),
        )
        .await
        .unwrap();

    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let calcli = Calcli::new(config).await.unwrap();

    let event = calcli.get_event(&Id::Uid("ext-event".to_string())).unwrap();
    assert_eq!(event.summary(), "Synced meeting");

    let todo = calcli.get_todo(&Id::Uid("ext-todo".to_string())).unwrap();
    assert_eq!(todo.summary(), "Synced task");
}

#[tokio::test]
async fn file_sync_writes_one_component_per_file() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();

    let todo = calcli
        .new_todo(test_todo_draft("On disk"), None)
        .await
        .unwrap();
    let uid = todo.uid().to_string();

    let path = temp_dirs
        .calendar_path
        .join("personal")
        .join(format!("{uid}.ics"));
    let content = fs::read_to_string(&path).await.unwrap();
    assert!(content.contains("BEGIN:VCALENDAR"));
    assert!(content.contains("BEGIN:VTODO"));
    assert!(content.contains(&format!("UID:{uid}")));
    assert_eq!(content.matches("BEGIN:VTODO").count(), 1);
}

#[tokio::test]
async fn file_sync_multiple_collections() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    fs::create_dir_all(temp_dirs.calendar_path.join("work"))
        .await
        .unwrap();

    let mut config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    config.default_calendar = Some("personal".to_string());
    let mut calcli = Calcli::new(config).await.unwrap();

    let defaulted = calcli
        .new_todo(test_todo_draft("Home chore"), None)
        .await
        .unwrap();
    let targeted = calcli
        .new_todo(test_todo_draft("Office chore"), Some("work"))
        .await
        .unwrap();

    let home_id = Id::Uid(defaulted.uid().to_string());
    let office_id = Id::Uid(targeted.uid().to_string());
    assert_eq!(calcli.collection_of(&home_id), Some("personal"));
    assert_eq!(calcli.collection_of(&office_id), Some("work"));

    let calendars = calcli.calendars();
    let names: Vec<_> = calendars.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["personal", "work"]);
    let personal = &calendars[0];
    assert_eq!(personal.todos, 1);
    assert_eq!(personal.events, 0);

    // Unknown target calendars are an error
    assert!(
        calcli
            .new_todo(test_todo_draft("Lost"), Some("nope"))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn file_sync_skips_malformed_files() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    temp_dirs
        .create_ics_file("personal", "broken", "this is not icalendar data")
        .await
        .unwrap();
    temp_dirs
        .create_ics_file(
            "personal",
            "good",
            &sample_event_ics("good", "Still loads", "20250115"),
        )
        .await
        .unwrap();

    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let calcli = Calcli::new(config).await.unwrap();

    assert!(calcli.get_event(&Id::Uid("good".to_string())).is_some());
    assert!(calcli.get_event(&Id::Uid("broken".to_string())).is_none());
}
