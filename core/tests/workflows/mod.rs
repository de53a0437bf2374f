// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end workflow tests for the calcli-core crate.
//!
//! These tests validate multi-step workflows that integrate multiple
//! components: vdir file layout, the in-memory index, configuration defaults
//! and short id resolution.

mod event_lifecycle;
mod file_sync;
mod todo_lifecycle;
