// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end event lifecycle workflow tests.
//!
//! These tests validate complete workflows from event creation through
//! modification and cancellation, including filtering and pagination.

use calcli_core::{
    Calcli, DateTimeAnchor, Event, EventConditions, EventDraft, EventPatch, EventStatus, Id, Kind,
    Pager,
};
use chrono::Duration;

use crate::common::{setup_temp_dirs, test_config};

#[tokio::test]
async fn event_lifecycle_create_and_get() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();

    let draft = EventDraft {
        summary: "Dentist".to_string(),
        location: Some("Via Roma 1".to_string()),
        ..calcli.default_event_draft()
    };
    let event = calcli.new_event(draft, None).await.unwrap();
    let uid = event.uid().to_string();

    assert_eq!(event.summary(), "Dentist");
    assert_eq!(event.location(), Some("Via Roma 1"));
    assert_eq!(event.status(), Some(EventStatus::Confirmed));
    assert!(event.start().is_some());
    assert!(event.end().is_some());

    let retrieved = calcli.get_event(&Id::Uid(uid.clone())).unwrap();
    assert_eq!(retrieved.summary(), "Dentist");
    assert_eq!(retrieved.uid(), uid);
}

#[tokio::test]
async fn event_lifecycle_edit_and_cancel() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();

    let draft = EventDraft {
        summary: "Standup".to_string(),
        ..calcli.default_event_draft()
    };
    let event = calcli.new_event(draft, None).await.unwrap();
    let id = Id::Uid(event.uid().to_string());

    let patch = EventPatch {
        summary: Some("Standup (moved)".to_string()),
        description: Some(Some("Now in the big room".to_string())),
        ..Default::default()
    };
    let updated = calcli.update_event(&id, &patch).await.unwrap();
    assert_eq!(updated.summary(), "Standup (moved)");
    assert_eq!(updated.description(), Some("Now in the big room"));

    let patch = EventPatch {
        status: Some(EventStatus::Cancelled),
        ..Default::default()
    };
    let cancelled = calcli.update_event(&id, &patch).await.unwrap();
    assert_eq!(cancelled.status(), Some(EventStatus::Cancelled));
}

#[tokio::test]
async fn event_lifecycle_list_filters_and_paginates() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();
    let now = calcli.now();

    for (summary, offset_days) in [("today", 0), ("soon", 2), ("later", 30)] {
        let start = now + Duration::days(offset_days);
        let draft = EventDraft {
            summary: summary.to_string(),
            start: Some(start.into()),
            end: Some((start + Duration::hours(1)).into()),
            ..calcli.default_event_draft()
        };
        calcli.new_event(draft, None).await.unwrap();
    }

    // Only events starting within a week
    let conds = EventConditions {
        startable: Some(DateTimeAnchor::today()),
        cutoff: Some(DateTimeAnchor::InDays(7)),
    };
    let events = calcli.list_events(&conds, &(10, 0).into());
    let summaries: Vec<_> = events.iter().map(|a| a.summary().to_string()).collect();
    assert_eq!(summaries, ["today", "soon"]);
    assert_eq!(calcli.count_events(&conds), 2);

    // Pagination applies after sorting
    let page = calcli.list_events(&conds, &Pager {
        limit: 1,
        offset: 1,
    });
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].summary(), "soon");
}

#[tokio::test]
async fn event_lifecycle_list_includes_spanning_events() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();
    let now = calcli.now();

    // Started yesterday, still running tomorrow
    let draft = EventDraft {
        summary: "Conference".to_string(),
        start: Some((now - Duration::days(1)).into()),
        end: Some((now + Duration::days(1)).into()),
        ..calcli.default_event_draft()
    };
    calcli.new_event(draft, None).await.unwrap();

    // Over a week ago
    let draft = EventDraft {
        summary: "Retro".to_string(),
        start: Some((now - Duration::days(8)).into()),
        end: Some((now - Duration::days(8) + Duration::hours(1)).into()),
        ..calcli.default_event_draft()
    };
    calcli.new_event(draft, None).await.unwrap();

    // A single-day window still picks up events that span it
    let conds = EventConditions {
        startable: Some(DateTimeAnchor::today()),
        cutoff: Some(DateTimeAnchor::today()),
    };
    let events = calcli.list_events(&conds, &(10, 0).into());
    let summaries: Vec<_> = events.iter().map(|a| a.summary().to_string()).collect();
    assert_eq!(summaries, ["Conference"]);
}

#[tokio::test]
async fn event_lifecycle_delete() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.calendar_path, &temp_dirs.state_dir);
    let mut calcli = Calcli::new(config).await.unwrap();

    let draft = EventDraft {
        summary: "Ephemeral".to_string(),
        ..calcli.default_event_draft()
    };
    let event = calcli.new_event(draft, None).await.unwrap();
    let id = Id::Uid(event.uid().to_string());

    assert_eq!(calcli.get_kind(&id), Some(Kind::Event));
    assert_eq!(calcli.delete(&id).await.unwrap(), Kind::Event);
    assert_eq!(calcli.get_kind(&id), None);
    assert!(calcli.get_event(&id).is_none());
    assert!(calcli.delete(&id).await.is_err());
}
