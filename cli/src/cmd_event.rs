// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error;

use calcli_core::{
    Calcli, DateTimeAnchor, Event, EventConditions, EventPatch, EventStatus, EventWithShortId, Id,
    Pager,
};
use clap::{Arg, ArgMatches, Command, arg};
use colored::Colorize;

use crate::event_formatter::{EventColumn, EventFormatter};
use crate::util::{
    ArgOutputFormat, arg_calendar, arg_description, arg_id, arg_ids, arg_summary, get_calendar,
    get_description, get_id, get_ids, get_summary, parse_datetime, parse_datetime_range,
};

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<EventStatus>,
    pub calendar: Option<String>,

    pub output_format: ArgOutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Add a new event")
            .arg(arg_summary(true))
            .arg(arg_start())
            .arg(arg_end())
            .arg(arg_description())
            .arg(arg_location())
            .arg(arg_status())
            .arg(arg_calendar())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            summary: get_summary(matches).expect("summary is required"),
            description: get_description(matches),
            location: get_location(matches),
            start: get_start(matches),
            end: get_end(matches),
            status: get_status(matches),
            calendar: get_calendar(matches),

            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, calcli: &mut Calcli) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let now = calcli.now();
        let (start, end) = match (&self.start, &self.end) {
            (Some(start), Some(end)) => parse_datetime_range(&now, start, end)?,
            (Some(start), None) => (parse_datetime(&now, start)?, None),
            (None, Some(end)) => (None, parse_datetime(&now, end)?),
            (None, None) => (None, None),
        };

        let mut draft = calcli.default_event_draft();
        draft.summary = self.summary;
        draft.description = self.description;
        draft.location = self.location;
        if start.is_some() {
            draft.start = start;
        }
        if end.is_some() {
            draft.end = end;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }

        let event = calcli.new_event(draft, self.calendar.as_deref()).await?;
        print_events(&[event], self.output_format, false);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: Id,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<EventStatus>,

    pub output_format: ArgOutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event")
            .arg(arg_id())
            .arg(arg_summary(false))
            .arg(arg_start())
            .arg(arg_end())
            .arg(arg_description())
            .arg(arg_location())
            .arg(arg_status())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            summary: get_summary(matches),
            description: get_description(matches),
            location: get_location(matches),
            start: get_start(matches),
            end: get_end(matches),
            status: get_status(matches),

            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, calcli: &mut Calcli) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let now = calcli.now();
        let patch = EventPatch {
            summary: self.summary,
            // An empty string clears the property
            description: self.description.map(|d| (!d.is_empty()).then_some(d)),
            location: self.location.map(|l| (!l.is_empty()).then_some(l)),
            start: self.start.map(|s| parse_datetime(&now, &s)).transpose()?,
            end: self.end.map(|e| parse_datetime(&now, &e)).transpose()?,
            status: self.status,
        };
        if patch.is_empty() {
            return Err("Nothing to change, pass at least one field option".into());
        }

        let event = calcli.update_event(&self.id, &patch).await?;
        print_events(&[event], self.output_format, false);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventCancel {
    pub ids: Vec<Id>,
    pub output_format: ArgOutputFormat,
}

impl CmdEventCancel {
    pub const NAME: &str = "cancel";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark an event as cancelled")
            .arg(arg_ids())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, calcli: &mut Calcli) -> Result<(), Box<dyn Error>> {
        let patch = EventPatch {
            status: Some(EventStatus::Cancelled),
            ..Default::default()
        };
        for id in &self.ids {
            tracing::debug!(%id, "cancelling event...");
            let event = calcli.update_event(id, &patch).await?;
            print_events(&[event], self.output_format, false);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub conds: EventConditions,
    pub output_format: ArgOutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List upcoming events")
            .arg(arg!(-v --verbose "Also show event uids"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            conds: EventConditions {
                startable: Some(DateTimeAnchor::today()),
                cutoff: None,
            },
            output_format: ArgOutputFormat::from(matches),
            verbose: matches.get_flag("verbose"),
        }
    }

    pub async fn run(self, calcli: &Calcli) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        Self::list(calcli, &self.conds, self.output_format, self.verbose)
    }

    /// List events with the given conditions and output format.
    pub fn list(
        calcli: &Calcli,
        conds: &EventConditions,
        output_format: ArgOutputFormat,
        verbose: bool,
    ) -> Result<(), Box<dyn Error>> {
        const MAX: i64 = 128;
        let pager: Pager = (MAX, 0).into();
        let events = calcli.list_events(conds, &pager);
        if events.len() >= (MAX as usize) {
            let total = calcli.count_events(conds);
            if total > MAX as usize {
                let prompt = format!("Displaying the first {MAX}/{total} events");
                println!("{}", prompt.italic());
            }
        } else if events.is_empty() && output_format == ArgOutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(&events, output_format, verbose);
        Ok(())
    }
}

fn print_events<E: Event>(
    events: &[EventWithShortId<E>],
    output_format: ArgOutputFormat,
    verbose: bool,
) {
    let columns = if verbose {
        vec![
            EventColumn::short_id(),
            EventColumn::uid(),
            EventColumn::time_range(),
            EventColumn::summary(),
        ]
    } else {
        vec![
            EventColumn::short_id(),
            EventColumn::time_range(),
            EventColumn::summary(),
        ]
    };
    let formatter = EventFormatter::new(columns).with_output_format(output_format);
    println!("{}", formatter.format(events));
}

fn arg_start() -> Arg {
    arg!(--start <START> "Start date and time of the event")
}

fn get_start(matches: &ArgMatches) -> Option<String> {
    matches.get_one("start").cloned()
}

fn arg_end() -> Arg {
    arg!(--end <END> "End date and time of the event")
}

fn get_end(matches: &ArgMatches) -> Option<String> {
    matches.get_one("end").cloned()
}

fn arg_location() -> Arg {
    arg!(--location <LOCATION> "Location of the event")
}

fn get_location(matches: &ArgMatches) -> Option<String> {
    matches.get_one("location").cloned()
}

fn arg_status() -> Arg {
    arg!(--status <STATUS> "Status of the event").value_parser(clap::value_parser!(EventStatus))
}

fn get_status(matches: &ArgMatches) -> Option<EventStatus> {
    matches.get_one("status").copied()
}
