// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error;

use calcli_core::{Calcli, Event, Id, Kind, Todo};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::event_formatter::{EventColumn, EventFormatter};
use crate::todo_formatter::TodoFormatter;
use crate::util::{ArgOutputFormat, arg_id, format_datetime, get_id};

#[derive(Debug, Clone)]
pub struct CmdShow {
    pub id: Id,
    pub output_format: ArgOutputFormat,
}

impl CmdShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the details of an event or todo")
            .arg(arg_id())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, calcli: &Calcli) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing item...");
        match calcli.get_kind(&self.id) {
            Some(Kind::Event) => self.show_event(calcli),
            Some(Kind::Todo) => self.show_todo(calcli),
            None => Err(format!("No such event or todo: {}", self.id).into()),
        }
    }

    fn show_event(&self, calcli: &Calcli) -> Result<(), Box<dyn Error>> {
        let event = calcli
            .get_event(&self.id)
            .ok_or_else(|| format!("No such event: {}", self.id))?;

        if self.output_format == ArgOutputFormat::Json {
            let formatter = EventFormatter::new(vec![
                EventColumn::short_id(),
                EventColumn::uid(),
                EventColumn::time_range(),
                EventColumn::summary(),
            ])
            .with_output_format(ArgOutputFormat::Json);
            println!("{}", formatter.format(std::slice::from_ref(&event)));
            return Ok(());
        }

        println!("{} {}", "Event".bold(), event.inner.summary());
        field("Id", event.short_id);
        field("Uid", event.inner.uid());
        if let Some(calendar) = calcli.collection_of(&self.id) {
            field("Calendar", calendar);
        }
        if let Some(start) = event.inner.start() {
            field("Start", format_datetime(start));
        }
        if let Some(end) = event.inner.end() {
            field("End", format_datetime(end));
        }
        if let Some(status) = event.inner.status() {
            field("Status", status);
        }
        if let Some(location) = event.inner.location() {
            field("Location", location);
        }
        if let Some(description) = event.inner.description() {
            field("Description", description);
        }
        Ok(())
    }

    fn show_todo(&self, calcli: &Calcli) -> Result<(), Box<dyn Error>> {
        let todo = calcli
            .get_todo(&self.id)
            .ok_or_else(|| format!("No such todo: {}", self.id))?;

        if self.output_format == ArgOutputFormat::Json {
            let formatter = TodoFormatter::new(calcli.now())
                .with_output_format(ArgOutputFormat::Json);
            println!("{}", formatter.format(std::slice::from_ref(&todo)));
            return Ok(());
        }

        println!("{} {}", "Todo".bold(), todo.inner.summary());
        field("Id", todo.short_id);
        field("Uid", todo.inner.uid());
        if let Some(calendar) = calcli.collection_of(&self.id) {
            field("Calendar", calendar);
        }
        if let Some(due) = todo.inner.due() {
            field("Due", format_datetime(due));
        }
        if let Some(status) = todo.inner.status() {
            field("Status", status);
        }
        if todo.inner.priority() != calcli_core::Priority::None {
            field("Priority", u8::from(todo.inner.priority()));
        }
        if let Some(percent) = todo.inner.percent_complete() {
            field("Percent", format!("{percent}%"));
        }
        if let Some(completed) = todo.inner.completed() {
            field("Completed", completed.format("%Y-%m-%d %H:%M"));
        }
        if let Some(description) = todo.inner.description() {
            field("Description", description);
        }
        Ok(())
    }
}

fn field(name: &str, value: impl std::fmt::Display) {
    // Pad before coloring, the escape codes would count towards the width
    let name = format!("{:<12}", format!("{name}:"));
    println!("  {} {value}", name.bold());
}
