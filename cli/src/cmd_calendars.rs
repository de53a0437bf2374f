// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::borrow::Cow;
use std::error::Error;

use calcli_core::{Calcli, CalendarInfo};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdCalendars {
    pub output_format: ArgOutputFormat,
}

impl CmdCalendars {
    pub const NAME: &str = "calendars";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List calendar collections with their component counts")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, calcli: &Calcli) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing calendars...");
        let calendars = calcli.calendars();
        if calendars.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "No calendars found".italic());
            return Ok(());
        }

        let columns = [
            CalendarColumn::Name,
            CalendarColumn::Events,
            CalendarColumn::Todos,
            CalendarColumn::Path,
        ];
        match self.output_format {
            ArgOutputFormat::Json => {
                println!("{}", Table::new(TableStyleJson::new(), &columns, &calendars))
            }
            ArgOutputFormat::Table => {
                println!("{}", Table::new(TableStyleBasic::new(), &columns, &calendars))
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum CalendarColumn {
    Name,
    Events,
    Todos,
    Path,
}

impl TableColumn<CalendarInfo> for CalendarColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            CalendarColumn::Name => "Name",
            CalendarColumn::Events => "Events",
            CalendarColumn::Todos => "Todos",
            CalendarColumn::Path => "Path",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a CalendarInfo) -> Cow<'a, str> {
        match self {
            CalendarColumn::Name => Cow::from(&data.name),
            CalendarColumn::Events => format!("{} events", data.events).into(),
            CalendarColumn::Todos => format!("{} todos", data.todos).into(),
            CalendarColumn::Path => data.path.to_string_lossy(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            CalendarColumn::Events | CalendarColumn::Todos => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}
