// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test data factories for integration tests.

use std::path::Path;

use calcli_core::{Config, Priority, TodoDraft};

/// Creates a test configuration over the given temporary directories.
#[must_use]
pub fn test_config(calendar_path: &Path, state_dir: &Path) -> Config {
    Config {
        calendar_path: calendar_path.to_path_buf(),
        default_calendar: None,
        state_dir: Some(state_dir.to_path_buf()),
        default_due: None,
        default_priority: Priority::None,
    }
}

/// Creates a test todo draft with the given summary.
#[must_use]
pub fn test_todo_draft(summary: &str) -> TodoDraft {
    TodoDraft {
        summary: summary.to_string(),
        ..Default::default()
    }
}

/// Returns sample iCalendar content for a single event.
#[must_use]
#[allow(dead_code)]
pub fn sample_event_ics(uid: &str, summary: &str, date: &str) -> String {
    format!(
        r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//calcli//Test//EN
BEGIN:VEVENT
UID:{uid}
DTSTAMP:{date}T120000Z
DTSTART:{date}T100000Z
DTEND:{date}T110000Z
SUMMARY:{summary}
END:VEVENT
END:VCALENDAR
"#
    )
}

/// Returns sample iCalendar content for a single todo.
#[must_use]
#[allow(dead_code)]
pub fn sample_todo_ics(uid: &str, summary: &str, due: &str) -> String {
    format!(
        r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//calcli//Test//EN
BEGIN:VTODO
UID:{uid}
DTSTAMP:{due}T120000Z
DUE:{due}T100000Z
SUMMARY:{summary}
STATUS:NEEDS-ACTION
END:VTODO
END:VCALENDAR
"#
    )
}
