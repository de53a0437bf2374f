// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{borrow::Cow, fmt};

use calcli_core::{Event, EventWithShortId};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_datetime};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>) -> Self {
        Self {
            columns,
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a, E: Event>(&'a self, events: &'a [EventWithShortId<E>]) -> Display<'a, E> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, E: Event> {
    events: &'a [EventWithShortId<E>],
    formatter: &'a EventFormatter,
}

impl<E: Event> fmt::Display for Display<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), &self.formatter.columns, self.events)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), &self.formatter.columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    ShortId,
    Summary,
    TimeRange,
    Uid,
}

impl EventColumn {
    pub fn short_id() -> Self {
        EventColumn::ShortId
    }

    pub fn summary() -> Self {
        EventColumn::Summary
    }

    pub fn time_range() -> Self {
        EventColumn::TimeRange
    }

    pub fn uid() -> Self {
        EventColumn::Uid
    }
}

impl<E: Event> TableColumn<EventWithShortId<E>> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::ShortId => "Id",
            EventColumn::Summary => "Summary",
            EventColumn::TimeRange => "Time Range",
            EventColumn::Uid => "Uid",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a EventWithShortId<E>) -> Cow<'a, str> {
        match self {
            EventColumn::ShortId => data.short_id.to_string().into(),
            EventColumn::Summary => data.inner.summary().into(),
            EventColumn::TimeRange => format_time_range(&data.inner).into(),
            EventColumn::Uid => data.inner.uid().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::ShortId | EventColumn::Uid => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}

fn format_time_range(event: &impl Event) -> String {
    match (event.start(), event.end()) {
        (Some(start), Some(end)) if start.date() == end.date() => {
            match (start.time(), end.time()) {
                (Some(stime), Some(etime)) => format!(
                    "{} {}~{}",
                    start.date().format("%Y-%m-%d"),
                    stime.format("%H:%M"),
                    etime.format("%H:%M")
                ),
                (Some(stime), None) => format!(
                    "{} {}~24:00",
                    start.date().format("%Y-%m-%d"),
                    stime.format("%H:%M")
                ),
                (None, Some(etime)) => format!(
                    "{} 00:00~{}",
                    start.date().format("%Y-%m-%d"),
                    etime.format("%H:%M")
                ),
                (None, None) => start.date().format("%Y-%m-%d").to_string(),
            }
        }
        (Some(start), Some(end)) => {
            format!("{}~{}", format_datetime(start), format_datetime(end))
        }
        (Some(start), None) => format_datetime(start),
        (None, Some(end)) => format!("~{}", format_datetime(end)),
        (None, None) => String::new(),
    }
}
