// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cmp::Ordering;
use std::error::Error;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tokio::fs;
use uuid::Uuid;

use crate::event::ParsedEventConditions;
use crate::{
    Config, Event, EventConditions, EventDraft, EventPatch, EventWithShortId, Id, Kind,
    LooseDateTime, Pager, RangePosition, ShortIdMap, Todo, TodoConditions, TodoDraft, TodoPatch,
    TodoSort, TodoSortKey, TodoStatus, TodoWithShortId, VdirStore,
};

/// Summary of one calendar collection, for display.
#[derive(Debug, Clone)]
pub struct CalendarInfo {
    /// The collection name.
    pub name: String,

    /// Absolute path of the collection directory.
    pub path: PathBuf,

    /// Number of events in the collection.
    pub events: usize,

    /// Number of todos in the collection.
    pub todos: usize,
}

/// The calcli application façade: configuration, the vdir store and the
/// short id map, behind one API the commands talk to.
#[derive(Debug)]
pub struct Calcli {
    now: DateTime<Local>,
    config: Config,
    store: VdirStore,
    short_ids: ShortIdMap,
}

impl Calcli {
    /// Creates a new instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;

        if let Some(state_dir) = &config.state_dir {
            fs::create_dir_all(state_dir)
                .await
                .map_err(|e| format!("Failed to create state directory: {e}"))?;
        }

        let store = VdirStore::open(&config.calendar_path).await?;
        let short_ids = ShortIdMap::load_or_new(&config).await?;

        Ok(Self {
            now: Local::now(),
            config,
            store,
            short_ids,
        })
    }

    /// The time this instance was created, used as "now" for the whole run.
    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// An event draft prefilled with the defaults for new events.
    pub fn default_event_draft(&self) -> EventDraft {
        EventDraft::default(self.now)
    }

    /// A todo draft prefilled with the defaults for new todos.
    pub fn default_todo_draft(&self) -> TodoDraft {
        TodoDraft::default()
    }

    /// Creates a new event in the given calendar, or the default one.
    pub async fn new_event(
        &mut self,
        draft: EventDraft,
        calendar: Option<&str>,
    ) -> Result<EventWithShortId<icalendar::Event>, Box<dyn Error>> {
        let uid = self.generate_uid();
        let event = draft.into_ics(&self.now, &uid);
        let calendar = calendar.or(self.config.default_calendar.as_deref());
        self.store.insert_event(calendar, event.clone()).await?;
        Ok(EventWithShortId::with(&self.short_ids, event))
    }

    /// Creates a new todo in the given calendar, or the default one.
    pub async fn new_todo(
        &mut self,
        draft: TodoDraft,
        calendar: Option<&str>,
    ) -> Result<TodoWithShortId<icalendar::Todo>, Box<dyn Error>> {
        let uid = self.generate_uid();
        let todo = draft.into_ics(&self.config, &self.now, &uid);
        let calendar = calendar.or(self.config.default_calendar.as_deref());
        self.store.insert_todo(calendar, todo.clone()).await?;
        Ok(TodoWithShortId::with(&self.short_ids, todo))
    }

    /// Applies a patch to an existing event.
    pub async fn update_event(
        &mut self,
        id: &Id,
        patch: &EventPatch,
    ) -> Result<EventWithShortId<icalendar::Event>, Box<dyn Error>> {
        let uid = self.short_ids.get_uid(id.clone());
        self.store.update_event(&uid, patch).await?;
        let event = self
            .store
            .event(&uid)
            .ok_or_else(|| format!("No such event: {id}"))?;
        Ok(EventWithShortId::with(&self.short_ids, event.clone()))
    }

    /// Applies a patch to an existing todo.
    pub async fn update_todo(
        &mut self,
        id: &Id,
        patch: &TodoPatch,
    ) -> Result<TodoWithShortId<icalendar::Todo>, Box<dyn Error>> {
        let uid = self.short_ids.get_uid(id.clone());
        self.store.update_todo(&self.now, &uid, patch).await?;
        let todo = self
            .store
            .todo(&uid)
            .ok_or_else(|| format!("No such todo: {id}"))?;
        Ok(TodoWithShortId::with(&self.short_ids, todo.clone()))
    }

    /// Deletes an event or todo, reporting what kind it was.
    pub async fn delete(&mut self, id: &Id) -> Result<Kind, Box<dyn Error>> {
        let uid = self.short_ids.get_uid(id.clone());
        self.store.remove(&uid).await
    }

    /// Looks up an event by id.
    pub fn get_event(
        &self,
        id: &Id,
    ) -> Option<EventWithShortId<icalendar::Event>> {
        let uid = self.short_ids.get_uid(id.clone());
        self.store
            .event(&uid)
            .map(|a| EventWithShortId::with(&self.short_ids, a.clone()))
    }

    /// Looks up a todo by id.
    pub fn get_todo(&self, id: &Id) -> Option<TodoWithShortId<icalendar::Todo>> {
        let uid = self.short_ids.get_uid(id.clone());
        self.store
            .todo(&uid)
            .map(|a| TodoWithShortId::with(&self.short_ids, a.clone()))
    }

    /// What kind of component an id refers to, if any.
    pub fn get_kind(&self, id: &Id) -> Option<Kind> {
        let uid = self.short_ids.get_uid(id.clone());
        self.store.kind_of(&uid)
    }

    /// Lists events matching the conditions, ordered by start time.
    pub fn list_events(
        &self,
        conds: &EventConditions,
        pager: &Pager,
    ) -> Vec<EventWithShortId<icalendar::Event>> {
        let mut events: Vec<_> = self.filter_events(conds).collect();
        events.sort_by(|a, b| compare_events(*a, *b));
        paginate(events, pager)
            .map(|a| EventWithShortId::with(&self.short_ids, a.clone()))
            .collect()
    }

    /// Counts events matching the conditions.
    pub fn count_events(&self, conds: &EventConditions) -> usize {
        self.filter_events(conds).count()
    }

    /// Lists todos matching the conditions, in the given sort order.
    pub fn list_todos(
        &self,
        conds: &TodoConditions,
        sorts: &[TodoSort],
        pager: &Pager,
    ) -> Vec<TodoWithShortId<icalendar::Todo>> {
        let mut todos: Vec<_> = self.filter_todos(conds).collect();
        todos.sort_by(|a, b| compare_todos(*a, *b, sorts));
        paginate(todos, pager)
            .map(|a| TodoWithShortId::with(&self.short_ids, a.clone()))
            .collect()
    }

    /// Counts todos matching the conditions.
    pub fn count_todos(&self, conds: &TodoConditions) -> usize {
        self.filter_todos(conds).count()
    }

    /// Lists the calendar collections with their component counts.
    pub fn calendars(&self) -> Vec<CalendarInfo> {
        self.store
            .collections()
            .iter()
            .map(|a| CalendarInfo {
                name: a.name.clone(),
                path: a.path.clone(),
                events: self.store.count_events_in(&a.name),
                todos: self.store.count_todos_in(&a.name),
            })
            .collect()
    }

    /// The collection an existing component lives in.
    pub fn collection_of(&self, id: &Id) -> Option<&str> {
        let uid = self.short_ids.get_uid(id.clone());
        self.store.collection_of(&uid)
    }

    /// Flushes application state to disk.
    pub async fn close(&mut self) -> Result<(), Box<dyn Error>> {
        if let Err(e) = self.short_ids.dump(&self.config).await {
            tracing::warn!("Failed to save short id map: {e}");
        }
        Ok(())
    }

    fn filter_events(
        &self,
        conds: &EventConditions,
    ) -> impl Iterator<Item = &icalendar::Event> {
        let parsed = ParsedEventConditions::parse(&self.now, conds);
        self.store.events().filter(move |event| {
            let start = event.start();
            let end = event.end();
            // The event is out of the window when it starts after the window
            // end or ends before the window start
            if let Some(start_before) = parsed.start_before
                && LooseDateTime::position_in_range(&start_before, &start, &end)
                    == RangePosition::Before
            {
                return false;
            }
            if let Some(end_after) = parsed.end_after
                && LooseDateTime::position_in_range(&end_after, &start, &end)
                    == RangePosition::After
            {
                return false;
            }
            true
        })
    }

    fn filter_todos(&self, conds: &TodoConditions) -> impl Iterator<Item = &icalendar::Todo> {
        let due_before = conds.due.map(|a| a.resolve_at_end_of_day(&self.now));
        let status = conds.status;
        self.store.todos().filter(move |todo| {
            if let Some(status) = status {
                // A todo without STATUS counts as needing action
                let todo_status = Todo::status(*todo).unwrap_or(TodoStatus::NeedsAction);
                if todo_status != status {
                    return false;
                }
            }
            if let Some(due_before) = due_before
                && let Some(due) = todo.due()
                && due.with_start_of_day() > due_before
            {
                return false;
            }
            true
        })
    }

    /// Allocates a UID no existing component uses.
    fn generate_uid(&self) -> String {
        const MAX_TRIES: usize = 16;
        for _ in 0..MAX_TRIES {
            let uid = Uuid::new_v4().to_string();
            if !self.store.has_uid(&uid) {
                return uid;
            }
        }
        unreachable!("UUID collisions {MAX_TRIES} times in a row");
    }
}

fn compare_events(a: &icalendar::Event, b: &icalendar::Event) -> Ordering {
    let ka = a.start().map(|s| s.with_start_of_day());
    let kb = b.start().map(|s| s.with_start_of_day());
    match (ka, kb) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| Event::uid(a).cmp(Event::uid(b)))
}

fn compare_todos(a: &icalendar::Todo, b: &icalendar::Todo, sorts: &[TodoSort]) -> Ordering {
    let mut ord = Ordering::Equal;
    for sort in sorts {
        if ord != Ordering::Equal {
            break;
        }
        let key_ord = match sort.key {
            TodoSortKey::Due => {
                let ka = a.due().map(|d| d.with_start_of_day());
                let kb = b.due().map(|d| d.with_start_of_day());
                match (ka, kb) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
            TodoSortKey::Priority => a.priority().sort_key().cmp(&b.priority().sort_key()),
        };
        ord = sort.order.apply(key_ord);
    }
    ord.then_with(|| Todo::uid(a).cmp(Todo::uid(b)))
}

fn paginate<T>(items: Vec<T>, pager: &Pager) -> impl Iterator<Item = T> {
    items
        .into_iter()
        .skip(pager.offset.max(0) as usize)
        .take(pager.limit.max(0) as usize)
}
