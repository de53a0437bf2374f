// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

mod cli;
mod cmd_calendars;
mod cmd_dashboard;
mod cmd_delete;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_show;
mod cmd_todo;
mod config;
mod event_formatter;
mod table;
mod todo_formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
