// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use icalendar::Component;

use crate::{Config, DateTimeAnchor, LooseDateTime, Priority, SortOrder};

pub(crate) const KEY_COMPLETED: &str = "COMPLETED";
pub(crate) const KEY_DESCRIPTION: &str = "DESCRIPTION";
pub(crate) const KEY_DUE: &str = "DUE";

/// Trait representing a todo item.
pub trait Todo {
    /// The short identifier for the todo.
    /// It will be `None` if the todo does not have a short ID.
    /// It is used for display purposes and may not be unique.
    fn short_id(&self) -> Option<NonZeroU32> {
        None
    }

    /// The unique identifier for the todo item.
    fn uid(&self) -> &str;

    /// The summary of the todo item.
    fn summary(&self) -> &str;

    /// The description of the todo item, if available.
    fn description(&self) -> Option<&str>;

    /// The due date and time of the todo item, if available.
    fn due(&self) -> Option<LooseDateTime>;

    /// The completion date and time of the todo item, if available.
    fn completed(&self) -> Option<DateTime<Local>>;

    /// The percent complete, from 0 to 100.
    fn percent_complete(&self) -> Option<u8>;

    /// The priority from 1 to 9, where 1 is the highest priority.
    fn priority(&self) -> Priority;

    /// The status of the todo item, if available.
    fn status(&self) -> Option<TodoStatus>;
}

impl Todo for icalendar::Todo {
    fn uid(&self) -> &str {
        self.get_uid().unwrap_or_default()
    }

    fn summary(&self) -> &str {
        self.get_summary().unwrap_or_default()
    }

    fn description(&self) -> Option<&str> {
        self.get_description()
    }

    fn due(&self) -> Option<LooseDateTime> {
        self.get_due().map(Into::into)
    }

    fn completed(&self) -> Option<DateTime<Local>> {
        self.get_completed().map(|dt| dt.with_timezone(&Local))
    }

    fn percent_complete(&self) -> Option<u8> {
        self.get_percent_complete()
    }

    fn priority(&self) -> Priority {
        self.get_priority().map(Priority::from).unwrap_or_default()
    }

    fn status(&self) -> Option<TodoStatus> {
        self.get_status().map(|s| (&s).into())
    }
}

/// Draft for a todo item, used for creating new todos.
#[derive(Debug, Default)]
pub struct TodoDraft {
    /// The summary of the todo item.
    pub summary: String,

    /// The description of the todo item, if available.
    pub description: Option<String>,

    /// The due date and time of the todo item, if available.
    pub due: Option<LooseDateTime>,

    /// The priority of the todo item.
    pub priority: Option<Priority>,

    /// The status of the todo item, if available.
    pub status: Option<TodoStatus>,
}

impl TodoDraft {
    /// Converts the draft into an icalendar Todo component, filling in
    /// configured defaults for due and priority.
    pub(crate) fn into_ics(
        self,
        config: &Config,
        now: &DateTime<Local>,
        uid: &str,
    ) -> icalendar::Todo {
        let mut todo = icalendar::Todo::new();
        Component::uid(&mut todo, uid);

        Component::summary(&mut todo, &self.summary);

        if let Some(description) = self.description {
            Component::description(&mut todo, &description);
        }

        match self.due {
            Some(due) => {
                icalendar::Todo::due(&mut todo, due);
            }
            None => {
                if let Some(default_due) = &config.default_due {
                    icalendar::Todo::due(
                        &mut todo,
                        LooseDateTime::Local(default_due.datetime(*now)),
                    );
                }
            }
        }

        let priority = self.priority.unwrap_or(config.default_priority);
        if priority != Priority::None {
            Component::priority(&mut todo, priority.into());
        }

        let status = self.status.unwrap_or(TodoStatus::NeedsAction);
        icalendar::Todo::status(&mut todo, status.into());

        todo
    }
}

/// Patch for a todo item, allowing partial updates.
#[derive(Debug, Default, Clone)]
pub struct TodoPatch {
    /// The summary of the todo item, if available.
    pub summary: Option<String>,

    /// The description of the todo item, if available.
    pub description: Option<Option<String>>,

    /// The due date and time of the todo item, if available.
    pub due: Option<Option<LooseDateTime>>,

    /// The percent complete, from 0 to 100.
    pub percent_complete: Option<Option<u8>>,

    /// The priority of the todo item, from 1 to 9, where 1 is the highest priority.
    pub priority: Option<Priority>,

    /// The status of the todo item, if available.
    pub status: Option<TodoStatus>,
}

impl TodoPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.due.is_none()
            && self.percent_complete.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Applies the patch to a mutable todo item, modifying it in place.
    ///
    /// Marking a todo completed also stamps COMPLETED and a 100 percent
    /// progress; reopening it clears them.
    pub(crate) fn apply_to<'a>(
        &self,
        now: &DateTime<Local>,
        t: &'a mut icalendar::Todo,
    ) -> &'a mut icalendar::Todo {
        if let Some(summary) = &self.summary {
            t.summary(summary);
        }

        if let Some(description) = &self.description {
            match description {
                Some(desc) => {
                    t.description(desc);
                }
                None => {
                    t.remove_property(KEY_DESCRIPTION);
                }
            };
        }

        if let Some(due) = &self.due {
            match due {
                Some(d) => {
                    t.due(*d);
                }
                None => {
                    t.remove_property(KEY_DUE);
                }
            };
        }

        if let Some(percent) = self.percent_complete {
            t.percent_complete(percent.unwrap_or(0));
        }

        if let Some(priority) = self.priority {
            t.priority(priority.into());
        }

        if let Some(status) = self.status {
            t.status(status.into());
            match status {
                TodoStatus::Completed => {
                    t.completed(now.with_timezone(&Utc));
                    t.percent_complete(100);
                }
                TodoStatus::NeedsAction => {
                    t.remove_property(KEY_COMPLETED);
                    t.percent_complete(0);
                }
                _ => {}
            }
        }

        t
    }
}

/// The status of a todo item, which can be one of several predefined states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TodoStatus {
    /// The todo item needs action.
    NeedsAction,
    /// The todo item has been completed.
    Completed,
    /// The todo item is currently in process.
    InProcess,
    /// The todo item has been cancelled.
    Cancelled,
}

const STATUS_NEEDS_ACTION: &str = "NEEDS-ACTION";
const STATUS_COMPLETED: &str = "COMPLETED";
const STATUS_IN_PROCESS: &str = "IN-PROGRESS";
const STATUS_CANCELLED: &str = "CANCELLED";

impl AsRef<str> for TodoStatus {
    fn as_ref(&self) -> &str {
        match self {
            TodoStatus::NeedsAction => STATUS_NEEDS_ACTION,
            TodoStatus::Completed => STATUS_COMPLETED,
            TodoStatus::InProcess => STATUS_IN_PROCESS,
            TodoStatus::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TodoStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_NEEDS_ACTION => Ok(TodoStatus::NeedsAction),
            STATUS_COMPLETED => Ok(TodoStatus::Completed),
            STATUS_IN_PROCESS => Ok(TodoStatus::InProcess),
            STATUS_CANCELLED => Ok(TodoStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl From<TodoStatus> for icalendar::TodoStatus {
    fn from(item: TodoStatus) -> icalendar::TodoStatus {
        match item {
            TodoStatus::NeedsAction => icalendar::TodoStatus::NeedsAction,
            TodoStatus::Completed => icalendar::TodoStatus::Completed,
            TodoStatus::InProcess => icalendar::TodoStatus::InProcess,
            TodoStatus::Cancelled => icalendar::TodoStatus::Cancelled,
        }
    }
}

impl From<&icalendar::TodoStatus> for TodoStatus {
    fn from(status: &icalendar::TodoStatus) -> Self {
        match status {
            icalendar::TodoStatus::NeedsAction => TodoStatus::NeedsAction,
            icalendar::TodoStatus::Completed => TodoStatus::Completed,
            icalendar::TodoStatus::InProcess => TodoStatus::InProcess,
            icalendar::TodoStatus::Cancelled => TodoStatus::Cancelled,
        }
    }
}

/// Conditions for filtering todo items.
#[derive(Debug, Default, Clone, Copy)]
pub struct TodoConditions {
    /// The status of the todo item to filter by, if any.
    pub status: Option<TodoStatus>,

    /// Keep only todos due up to this point, if any.
    pub due: Option<DateTimeAnchor>,
}

/// The key by which todo items can be sorted.
#[derive(Debug, Clone, Copy)]
pub enum TodoSortKey {
    /// Sort by the due date and time of the todo item.
    Due,
    /// Sort by the priority of the todo item.
    Priority,
}

/// A sort directive for todo items: a key and an order.
#[derive(Debug, Clone, Copy)]
pub struct TodoSort {
    /// The key by which to sort the todo items.
    pub key: TodoSortKey,
    /// The order in which to sort the todo items (ascending or descending).
    pub order: SortOrder,
}

impl From<(TodoSortKey, SortOrder)> for TodoSort {
    fn from((key, order): (TodoSortKey, SortOrder)) -> Self {
        Self { key, order }
    }
}
