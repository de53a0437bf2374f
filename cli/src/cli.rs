// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{error::Error, ffi::OsString, path::PathBuf};

use calcli_core::{APP_NAME, Calcli};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_calendars::CmdCalendars;
use crate::cmd_dashboard::CmdDashboard;
use crate::cmd_delete::CmdDelete;
use crate::cmd_event::{CmdEventCancel, CmdEventEdit, CmdEventList, CmdEventNew};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_show::CmdShow;
use crate::cmd_todo::{CmdTodoDone, CmdTodoEdit, CmdTodoList, CmdTodoNew, CmdTodoUndo};
use crate::config::{Config, parse_config};

/// Run the calcli command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {e}", "Error:".red());
                std::process::exit(1);
            }
        }
        Err(e) => {
            println!("{} {e}", "Error:".red());
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("khal-based command line calendar tool with a taskwarrior-like interface")
            .author("Enrico Zini <enrico@enricozini.org>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to dashboard
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/calcli/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/calcli/config.toml on Windows. The CALCLI_CONFIG environment variable \
overrides the default.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdDashboard::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventNew::command().alias("add"))
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventCancel::command()),
            )
            .subcommand(
                Command::new("todo")
                    .alias("t")
                    .about("Manage your todo list")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTodoList::command())
                    .subcommand(CmdTodoNew::command().alias("add"))
                    .subcommand(CmdTodoEdit::command())
                    .subcommand(CmdTodoDone::command())
                    .subcommand(CmdTodoUndo::command()),
            )
            .subcommand(CmdEventNew::command().name("add").about("Add a new event"))
            .subcommand(CmdTodoDone::command())
            .subcommand(CmdTodoUndo::command())
            .subcommand(CmdShow::command())
            .subcommand(CmdDelete::command())
            .subcommand(CmdCalendars::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDashboard::NAME, matches)) => Dashboard(CmdDashboard::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventCancel::NAME, matches)) => EventCancel(CmdEventCancel::from(matches)),
                _ => unreachable!(),
            },
            Some(("todo", matches)) => match matches.subcommand() {
                Some((CmdTodoList::NAME, matches)) => TodoList(CmdTodoList::from(matches)),
                Some((CmdTodoNew::NAME, matches)) => TodoNew(CmdTodoNew::from(matches)),
                Some((CmdTodoEdit::NAME, matches)) => TodoEdit(CmdTodoEdit::from(matches)),
                Some((CmdTodoDone::NAME, matches)) => TodoDone(CmdTodoDone::from(matches)),
                Some((CmdTodoUndo::NAME, matches)) => TodoUndo(CmdTodoUndo::from(matches)),
                _ => unreachable!(),
            },
            Some(("add", matches)) => EventNew(CmdEventNew::from(matches)),
            Some((CmdTodoDone::NAME, matches)) => TodoDone(CmdTodoDone::from(matches)),
            Some((CmdTodoUndo::NAME, matches)) => TodoUndo(CmdTodoUndo::from(matches)),
            Some((CmdShow::NAME, matches)) => Show(CmdShow::from(matches)),
            Some((CmdDelete::NAME, matches)) => Delete(CmdDelete::from(matches)),
            Some((CmdCalendars::NAME, matches)) => Calendars(CmdCalendars::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Dashboard(CmdDashboard),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the dashboard
    Dashboard(CmdDashboard),

    /// List events
    EventList(CmdEventList),

    /// Add a new event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Mark an event as cancelled
    EventCancel(CmdEventCancel),

    /// List todos
    TodoList(CmdTodoList),

    /// Add a new todo
    TodoNew(CmdTodoNew),

    /// Edit a todo
    TodoEdit(CmdTodoEdit),

    /// Mark a todo as done
    TodoDone(CmdTodoDone),

    /// Mark a todo as not done
    TodoUndo(CmdTodoUndo),

    /// Show the details of an event or todo
    Show(CmdShow),

    /// Delete an event or todo
    Delete(CmdDelete),

    /// List calendar collections
    Calendars(CmdCalendars),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Dashboard(a)   => Self::run_with(config, |x, c| a.run(x, c).boxed()).await,
            EventList(a)   => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            EventNew(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            EventEdit(a)   => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            EventCancel(a) => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TodoList(a)    => Self::run_with(config, |x, c| a.run(x, c).boxed()).await,
            TodoNew(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TodoEdit(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TodoDone(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TodoUndo(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            Show(a)        => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            Delete(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            Calendars(a)   => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Calcli, &'a Config) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, cli_config) = parse_config(config).await?;
        let mut calcli = Calcli::new(core_config).await?;

        f(&mut calcli, &cli_config).await?;

        calcli.close().await?;
        Ok(())
    }
}
