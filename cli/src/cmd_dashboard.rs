// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error;

use calcli_core::{Calcli, DateTimeAnchor, EventConditions, TodoConditions, TodoStatus};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::cmd_event::CmdEventList;
use crate::cmd_todo::CmdTodoList;
use crate::config::Config;
use crate::util::ArgOutputFormat;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdDashboard;

impl CmdDashboard {
    pub const NAME: &str = "dashboard";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the dashboard, with upcoming events and due todos")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdDashboard
    }

    /// Show the dashboard with events and todos.
    pub async fn run(self, calcli: &Calcli, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!("generating dashboard...");

        Self::list_events(calcli)?;
        println!();

        Self::list_todos(calcli, config)?;
        Ok(())
    }

    fn list_events(calcli: &Calcli) -> Result<(), Box<dyn Error>> {
        println!("🗓️ {}", "Events".bold());

        let mut flag = true;
        for (title, anchor) in [
            ("Today", DateTimeAnchor::today()),
            ("Tomorrow", DateTimeAnchor::tomorrow()),
        ] {
            let conds = EventConditions {
                startable: Some(anchor),
                cutoff: Some(anchor),
            };
            if calcli.count_events(&conds) == 0 {
                continue;
            }

            if !flag {
                println!();
            }
            println!(" {} {}", "►".green(), title.italic());
            CmdEventList::list(calcli, &conds, ArgOutputFormat::Table, false)?;
            flag = false;
        }

        if flag {
            println!("No upcoming events");
        }
        Ok(())
    }

    fn list_todos(calcli: &Calcli, config: &Config) -> Result<(), Box<dyn Error>> {
        let days = config.due_days();
        println!("✅ {}", format!("Todos: due in {days} days").bold());
        let conds = TodoConditions {
            status: Some(TodoStatus::NeedsAction),
            due: Some(DateTimeAnchor::InDays(days)),
        };
        CmdTodoList::list(calcli, &conds, ArgOutputFormat::Table)
    }
}
