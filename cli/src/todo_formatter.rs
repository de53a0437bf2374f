// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{borrow::Cow, fmt};

use calcli_core::{Priority, Todo, TodoStatus, TodoWithShortId};
use chrono::{DateTime, Local, NaiveDateTime};
use colored::Color;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_datetime};

#[derive(Debug)]
pub struct TodoFormatter {
    columns: Vec<TodoColumn>,
    format: ArgOutputFormat,
}

impl TodoFormatter {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            columns: vec![
                TodoColumn::Status,
                TodoColumn::ShortId,
                TodoColumn::Priority,
                TodoColumn::Due { now: now.naive_local() },
                TodoColumn::Summary,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a, T: Todo>(&'a self, todos: &'a [TodoWithShortId<T>]) -> Display<'a, T> {
        Display {
            todos,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, T: Todo> {
    todos: &'a [TodoWithShortId<T>],
    formatter: &'a TodoFormatter,
}

impl<T: Todo> fmt::Display for Display<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), &self.formatter.columns, self.todos)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), &self.formatter.columns, self.todos)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TodoColumn {
    Status,
    ShortId,
    Priority,
    Due { now: NaiveDateTime },
    Summary,
}

impl<T: Todo> TableColumn<TodoWithShortId<T>> for TodoColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            TodoColumn::Status => "Status",
            TodoColumn::ShortId => "Id",
            TodoColumn::Priority => "Priority",
            TodoColumn::Due { .. } => "Due",
            TodoColumn::Summary => "Summary",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a TodoWithShortId<T>) -> Cow<'a, str> {
        match self {
            TodoColumn::Status => format_status(&data.inner).into(),
            TodoColumn::ShortId => data.short_id.to_string().into(),
            TodoColumn::Priority => format_priority(data.inner.priority()).into(),
            TodoColumn::Due { .. } => data
                .inner
                .due()
                .map(format_datetime)
                .unwrap_or_default()
                .into(),
            TodoColumn::Summary => data.inner.summary().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            TodoColumn::ShortId | TodoColumn::Priority => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, data: &TodoWithShortId<T>) -> Option<Color> {
        match self {
            TodoColumn::Priority => Some(Color::Red),
            TodoColumn::Due { now } => due_color(&data.inner, now),
            _ => None,
        }
    }
}

fn format_status(todo: &impl Todo) -> String {
    match todo.status() {
        Some(TodoStatus::NeedsAction) | None => "[ ]".to_string(),
        Some(TodoStatus::Completed) => "[x]".to_string(),
        Some(TodoStatus::Cancelled) => " ✗ ".to_string(),
        Some(TodoStatus::InProcess) => match todo.percent_complete() {
            Some(percent) if percent > 0 => format!("{percent}%"),
            _ => "[-]".to_string(),
        },
    }
}

fn format_priority(priority: Priority) -> &'static str {
    match priority {
        Priority::P1 | Priority::P2 | Priority::P3 => "!!!",
        Priority::P4 | Priority::P5 | Priority::P6 => "!!",
        Priority::P7 | Priority::P8 | Priority::P9 => "!",
        Priority::None => "",
    }
}

fn due_color(todo: &impl Todo, now: &NaiveDateTime) -> Option<Color> {
    const COLOR_OVERDUE: Option<Color> = Some(Color::Red);
    const COLOR_TODAY: Option<Color> = Some(Color::Yellow);

    let due = todo.due()?;
    if due.date() > now.date() {
        None
    } else if due.date() < now.date() {
        COLOR_OVERDUE
    } else if let Some(due_time) = due.time() {
        if due_time < now.time() {
            COLOR_OVERDUE
        } else {
            COLOR_TODAY
        }
    } else {
        COLOR_TODAY
    }
}
