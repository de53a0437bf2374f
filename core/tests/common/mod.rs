// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared helpers for integration tests.

mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use fixtures::{sample_event_ics, sample_todo_ics, test_config, test_todo_draft};
#[allow(unused_imports)]
pub use temp_dir::{TempDirs, setup_temp_dirs};
