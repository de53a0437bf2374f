// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

mod calcli;
mod config;
mod datetime;
mod event;
mod short_id;
mod store;
mod todo;
mod types;

pub use crate::calcli::{Calcli, CalendarInfo};
pub use crate::config::{APP_NAME, Config, ConfigDue};
pub use crate::datetime::{DateTimeAnchor, LooseDateTime, RangePosition};
pub use crate::event::{Event, EventConditions, EventDraft, EventPatch, EventStatus};
pub use crate::short_id::{EventWithShortId, ShortIdMap, TodoWithShortId};
pub use crate::store::{Collection, VdirStore};
pub use crate::todo::{
    Todo, TodoConditions, TodoDraft, TodoPatch, TodoSort, TodoSortKey, TodoStatus,
};
pub use crate::types::{Id, Kind, Pager, Priority, SortOrder};
