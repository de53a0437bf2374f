// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error;

use calcli_core::{
    Calcli, DateTimeAnchor, Id, Pager, Priority, SortOrder, TodoConditions, TodoPatch, TodoSort,
    TodoSortKey, TodoStatus,
};
use clap::{Arg, ArgMatches, Command, arg};
use clap_num::number_range;
use colored::Colorize;

use crate::config::Config;
use crate::todo_formatter::TodoFormatter;
use crate::util::{
    ArgOutputFormat, arg_calendar, arg_description, arg_id, arg_ids, arg_summary, get_calendar,
    get_description, get_id, get_ids, get_summary, parse_datetime,
};

#[derive(Debug, Clone)]
pub struct CmdTodoNew {
    pub summary: String,
    pub description: Option<String>,
    pub due: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TodoStatus>,
    pub calendar: Option<String>,

    pub output_format: ArgOutputFormat,
}

impl CmdTodoNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Add a new todo")
            .arg(arg_summary(true))
            .arg(arg_due())
            .arg(arg_description())
            .arg(arg_priority())
            .arg(arg_status())
            .arg(arg_calendar())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            summary: get_summary(matches).expect("summary is required"),
            description: get_description(matches),
            due: get_due(matches),
            priority: get_priority(matches),
            status: get_status(matches),
            calendar: get_calendar(matches),

            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, calcli: &mut Calcli) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new todo...");
        let now = calcli.now();

        let mut draft = calcli.default_todo_draft();
        draft.summary = self.summary;
        draft.description = self.description;
        draft.due = self.due.map(|a| parse_datetime(&now, &a)).transpose()?.flatten();
        draft.priority = self.priority;
        draft.status = self.status;

        let todo = calcli.new_todo(draft, self.calendar.as_deref()).await?;
        let formatter = TodoFormatter::new(now).with_output_format(self.output_format);
        println!("{}", formatter.format(&[todo]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoEdit {
    pub id: Id,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub percent_complete: Option<u8>,
    pub priority: Option<Priority>,
    pub status: Option<TodoStatus>,

    pub output_format: ArgOutputFormat,
}

impl CmdTodoEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a todo item")
            .arg(arg_id())
            .arg(arg_summary(false))
            .arg(arg_due())
            .arg(arg_description())
            .arg(arg_percent_complete())
            .arg(arg_priority())
            .arg(arg_status())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            summary: get_summary(matches),
            description: get_description(matches),
            due: get_due(matches),
            percent_complete: get_percent_complete(matches),
            priority: get_priority(matches),
            status: get_status(matches),

            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, calcli: &mut Calcli) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing todo...");
        let now = calcli.now();
        let patch = TodoPatch {
            summary: self.summary,
            // An empty string clears the property
            description: self.description.map(|d| (!d.is_empty()).then_some(d)),
            due: self.due.map(|a| parse_datetime(&now, &a)).transpose()?,
            percent_complete: self.percent_complete.map(Some),
            priority: self.priority,
            status: self.status,
        };
        if patch.is_empty() {
            return Err("Nothing to change, pass at least one field option".into());
        }

        TodoEdit {
            id: self.id,
            patch,
            output_format: self.output_format,
        }
        .run(calcli)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoDone {
    pub ids: Vec<Id>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoDone {
    pub const NAME: &str = "done";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark a todo item as done")
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
        for id in self.ids {
            tracing::debug!(%id, "marking todo as done...");
            TodoEdit {
                id,
                output_format: self.output_format,
                patch: TodoPatch {
                    status: Some(TodoStatus::Completed),
                    ..Default::default()
                },
            }
            .run(calcli)
            .await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoUndo {
    pub ids: Vec<Id>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoUndo {
    pub const NAME: &str = "undo";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark a todo item as not done")
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
        for id in self.ids {
            tracing::debug!(%id, "marking todo as not done...");
            TodoEdit {
                id,
                output_format: self.output_format,
                patch: TodoPatch {
                    status: Some(TodoStatus::NeedsAction),
                    ..Default::default()
                },
            }
            .run(calcli)
            .await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdTodoList {
    pub all: bool,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List todos that need action")
            .arg(arg!(--all "Include completed and far-future todos"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            all: matches.get_flag("all"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, calcli: &Calcli, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing todos...");
        let conds = if self.all {
            TodoConditions::default()
        } else {
            TodoConditions {
                status: Some(TodoStatus::NeedsAction),
                due: Some(DateTimeAnchor::InDays(config.due_days())),
            }
        };
        Self::list(calcli, &conds, self.output_format)
    }

    /// List todos with the given conditions and output format.
    pub fn list(
        calcli: &Calcli,
        conds: &TodoConditions,
        output_format: ArgOutputFormat,
    ) -> Result<(), Box<dyn Error>> {
        const MAX: i64 = 128;
        let pager: Pager = (MAX, 0).into();
        let sorts = [
            TodoSort::from((TodoSortKey::Priority, SortOrder::Asc)),
            TodoSort::from((TodoSortKey::Due, SortOrder::Asc)),
        ];
        let todos = calcli.list_todos(conds, &sorts, &pager);
        if todos.len() >= (MAX as usize) {
            let total = calcli.count_todos(conds);
            if total > MAX as usize {
                let prompt = format!("Displaying the first {MAX}/{total} todos");
                println!("{}", prompt.italic());
            }
        } else if todos.is_empty() && output_format == ArgOutputFormat::Table {
            println!("{}", "No todos found".italic());
            return Ok(());
        }

        let formatter = TodoFormatter::new(calcli.now()).with_output_format(output_format);
        println!("{}", formatter.format(&todos));
        Ok(())
    }
}

struct TodoEdit {
    id: Id,
    patch: TodoPatch,
    output_format: ArgOutputFormat,
}

impl TodoEdit {
    async fn run(self, calcli: &mut Calcli) -> Result<(), Box<dyn Error>> {
        let todo = calcli.update_todo(&self.id, &self.patch).await?;
        let formatter = TodoFormatter::new(calcli.now()).with_output_format(self.output_format);
        println!("{}", formatter.format(&[todo]));
        Ok(())
    }
}

fn arg_due() -> Arg {
    arg!(--due <DUE> "Due date and time of the todo")
}

fn get_due(matches: &ArgMatches) -> Option<String> {
    matches.get_one("due").cloned()
}

fn arg_percent_complete() -> Arg {
    fn from_0_to_100(s: &str) -> Result<u8, String> {
        number_range(s, 0, 100)
    }

    arg!(--percent <PERCENT> "Percent complete of the todo (0-100)").value_parser(from_0_to_100)
}

fn get_percent_complete(matches: &ArgMatches) -> Option<u8> {
    matches.get_one("percent").copied()
}

fn arg_priority() -> Arg {
    arg!(-p --priority <PRIORITY> "Priority of the todo")
        .value_parser(clap::value_parser!(Priority))
}

fn get_priority(matches: &ArgMatches) -> Option<Priority> {
    matches.get_one("priority").copied()
}

fn arg_status() -> Arg {
    arg!(--status <STATUS> "Status of the todo").value_parser(clap::value_parser!(TodoStatus))
}

fn get_status(matches: &ArgMatches) -> Option<TodoStatus> {
    matches.get_one("status").copied()
}
