// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{DateTime, Local};

use calcli_core::{DateTimeAnchor, Id, LooseDateTime};
use clap::{Arg, ArgMatches, arg, value_parser};

use std::error::Error;

/// The output format for list-like commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn arg_id() -> Arg {
    arg!(id: <ID> "The short id or uid of the item")
}

pub fn get_id(matches: &ArgMatches) -> Id {
    let id = matches
        .get_one::<String>("id")
        .expect("id is required")
        .clone();

    Id::ShortIdOrUid(id)
}

pub fn arg_ids() -> Arg {
    arg!(id: <ID> "The short id or uid of the item").num_args(1..)
}

pub fn get_ids(matches: &ArgMatches) -> Vec<Id> {
    matches
        .get_many::<String>("id")
        .expect("id is required")
        .map(|a| Id::ShortIdOrUid(a.clone()))
        .collect()
}

pub fn arg_summary(positional: bool) -> Arg {
    match positional {
        true => arg!(summary: <SUMMARY> "Summary of the item"),
        false => arg!(summary: -s --summary <SUMMARY> "Summary of the item"),
    }
}

pub fn get_summary(matches: &ArgMatches) -> Option<String> {
    matches.get_one::<String>("summary").cloned()
}

pub fn arg_description() -> Arg {
    arg!(--description <DESCRIPTION> "Description of the item")
}

pub fn get_description(matches: &ArgMatches) -> Option<String> {
    matches.get_one("description").cloned()
}

pub fn arg_calendar() -> Arg {
    arg!(--calendar <CALENDAR> "Calendar collection to create the item in")
}

pub fn get_calendar(matches: &ArgMatches) -> Option<String> {
    matches.get_one("calendar").cloned()
}

/// Parses a date/time argument against the current time.
///
/// An empty string means "clear the value" in edit commands and maps to
/// `None`.
pub fn parse_datetime(
    now: &DateTime<Local>,
    s: &str,
) -> Result<Option<LooseDateTime>, Box<dyn Error>> {
    if s.is_empty() {
        return Ok(None);
    }
    let anchor: DateTimeAnchor = s.parse()?;
    Ok(Some(anchor.resolve_from(now)))
}

/// Parses a start/end pair, rejecting ranges that end before they start.
pub fn parse_datetime_range(
    now: &DateTime<Local>,
    start: &str,
    end: &str,
) -> Result<(Option<LooseDateTime>, Option<LooseDateTime>), Box<dyn Error>> {
    let start = parse_datetime(now, start)?;
    let end = parse_datetime(now, end)?;
    if let Some(start) = &start
        && let Some(end) = &end
        && end.with_end_of_day() < start.with_start_of_day()
    {
        return Err(format!(
            "End time {} is before start time {}",
            format_datetime(*end),
            format_datetime(*start)
        )
        .into());
    }
    Ok((start, end))
}

pub fn format_datetime(t: LooseDateTime) -> String {
    match t {
        LooseDateTime::DateOnly(d) => d.format("%Y-%m-%d"),
        LooseDateTime::Floating(dt) => dt.format("%Y-%m-%d %H:%M"),
        LooseDateTime::Local(dt) => dt.format("%Y-%m-%d %H:%M"),
    }
    .to_string()
}
