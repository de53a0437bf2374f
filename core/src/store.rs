// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use icalendar::{Calendar, CalendarComponent, Component};
use tokio::fs;

use crate::event::EventPatch;
use crate::todo::TodoPatch;
use crate::types::Kind;

/// A calendar collection: one subdirectory of the vdir root, holding one
/// iCalendar component per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// The collection name, the subdirectory name under the vdir root.
    pub name: String,

    /// Absolute path of the collection directory.
    pub path: PathBuf,
}

/// Name used when the vdir root itself holds the .ics files, without
/// collection subdirectories.
const DEFAULT_COLLECTION: &str = "default";

#[derive(Debug, Clone)]
struct StoredEvent {
    component: icalendar::Event,
    path: PathBuf,
    collection: String,
}

#[derive(Debug, Clone)]
struct StoredTodo {
    component: icalendar::Todo,
    path: PathBuf,
    collection: String,
}

/// A vdir calendar store, as used by khal and vdirsyncer.
///
/// The whole tree is scanned once at open time into an in-memory index;
/// mutations write the affected file and update the index in step.
#[derive(Debug)]
pub struct VdirStore {
    collections: Vec<Collection>,
    events: HashMap<String, StoredEvent>,
    todos: HashMap<String, StoredTodo>,
}

impl VdirStore {
    /// Opens a vdir root, scanning every collection into memory.
    ///
    /// Subdirectories of the root become collections; a root with .ics files
    /// directly inside it becomes a single collection named "default".
    /// Malformed files are skipped with a warning.
    pub async fn open(root: &Path) -> Result<Self, Box<dyn Error>> {
        let mut collections = Vec::new();

        let mut entries = fs::read_dir(root)
            .await
            .map_err(|e| format!("Failed to read calendar directory {:?}: {e}", root.display()))?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_dir() {
                let Some(name) = path.file_name().and_then(|a| a.to_str()) else {
                    continue;
                };
                if name.starts_with('.') {
                    continue;
                }
                collections.push(Collection {
                    name: name.to_string(),
                    path,
                });
            }
        }

        // A root without collection subdirectories is used as a single flat
        // collection, with the .ics files directly inside it
        if collections.is_empty() {
            collections.push(Collection {
                name: DEFAULT_COLLECTION.to_string(),
                path: root.to_owned(),
            });
        }
        collections.sort_by(|a, b| a.name.cmp(&b.name));

        let mut store = Self {
            collections,
            events: HashMap::new(),
            todos: HashMap::new(),
        };
        for collection in store.collections.clone() {
            store.scan_collection(&collection).await?;
        }
        Ok(store)
    }

    async fn scan_collection(&mut self, collection: &Collection) -> Result<(), Box<dyn Error>> {
        let mut count = 0;
        let mut entries = fs::read_dir(&collection.path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_dir() || !path.extension().is_some_and(|a| a == "ics") {
                continue;
            }

            let content = match fs::read_to_string(&path).await {
                Ok(a) => a,
                Err(e) => {
                    tracing::warn!("Skipping unreadable file {}: {e}", path.display());
                    continue;
                }
            };
            let calendar: Calendar = match content.parse() {
                Ok(a) => a,
                Err(e) => {
                    tracing::warn!("Skipping malformed file {:?}: {e}", path.display());
                    continue;
                }
            };

            for component in calendar.components {
                match component {
                    CalendarComponent::Event(event) => {
                        let Some(uid) = event.get_uid().map(str::to_string) else {
                            tracing::warn!("Skipping event without UID in {:?}", path.display());
                            continue;
                        };
                        let stored = StoredEvent {
                            component: event,
                            path: path.clone(),
                            collection: collection.name.clone(),
                        };
                        if let Some(prev) = self.events.insert(uid.clone(), stored) {
                            tracing::warn!(
                                "Duplicate UID {uid} in {:?} and {:?}",
                                prev.path.display(),
                                path.display()
                            );
                        }
                        count += 1;
                    }
                    CalendarComponent::Todo(todo) => {
                        let Some(uid) = todo.get_uid().map(str::to_string) else {
                            tracing::warn!("Skipping todo without UID in {:?}", path.display());
                            continue;
                        };
                        let stored = StoredTodo {
                            component: todo,
                            path: path.clone(),
                            collection: collection.name.clone(),
                        };
                        if let Some(prev) = self.todos.insert(uid.clone(), stored) {
                            tracing::warn!(
                                "Duplicate UID {uid} in {:?} and {:?}",
                                prev.path.display(),
                                path.display()
                            );
                        }
                        count += 1;
                    }
                    CalendarComponent::Other(other) => {
                        tracing::warn!(
                            "Ignoring unsupported {} component in {}",
                            other.component_kind(),
                            path.display()
                        );
                    }
                    _ => {
                        tracing::warn!("Ignoring unsupported component in {}", path.display());
                    }
                }
            }
        }

        tracing::debug!("Scanned {count} components from collection {}", collection.name);
        Ok(())
    }

    /// All collections, sorted by name.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Resolves a collection by name, or the only collection when `None`.
    pub fn collection(&self, name: Option<&str>) -> Result<&Collection, Box<dyn Error>> {
        match name {
            Some(name) => self
                .collections
                .iter()
                .find(|a| a.name == name)
                .ok_or_else(|| format!("No such calendar: {name}").into()),
            None => match self.collections.len() {
                0 => Err("No calendar collections found".into()),
                1 => Ok(&self.collections[0]),
                _ => Err("Multiple calendars found, specify one".into()),
            },
        }
    }

    /// Looks up an event by UID.
    pub fn event(&self, uid: &str) -> Option<&icalendar::Event> {
        self.events.get(uid).map(|a| &a.component)
    }

    /// Looks up a todo by UID.
    pub fn todo(&self, uid: &str) -> Option<&icalendar::Todo> {
        self.todos.get(uid).map(|a| &a.component)
    }

    /// All events, in no particular order.
    pub fn events(&self) -> impl Iterator<Item = &icalendar::Event> {
        self.events.values().map(|a| &a.component)
    }

    /// All todos, in no particular order.
    pub fn todos(&self) -> impl Iterator<Item = &icalendar::Todo> {
        self.todos.values().map(|a| &a.component)
    }

    /// Whether any component uses this UID.
    pub fn has_uid(&self, uid: &str) -> bool {
        self.events.contains_key(uid) || self.todos.contains_key(uid)
    }

    /// What kind of component a UID refers to, if any.
    pub fn kind_of(&self, uid: &str) -> Option<Kind> {
        if self.events.contains_key(uid) {
            Some(Kind::Event)
        } else if self.todos.contains_key(uid) {
            Some(Kind::Todo)
        } else {
            None
        }
    }

    /// The collection an existing component lives in.
    pub fn collection_of(&self, uid: &str) -> Option<&str> {
        self.events
            .get(uid)
            .map(|a| a.collection.as_str())
            .or_else(|| self.todos.get(uid).map(|a| a.collection.as_str()))
    }

    /// Number of events in a collection.
    pub fn count_events_in(&self, collection: &str) -> usize {
        self.events
            .values()
            .filter(|a| a.collection == collection)
            .count()
    }

    /// Number of todos in a collection.
    pub fn count_todos_in(&self, collection: &str) -> usize {
        self.todos
            .values()
            .filter(|a| a.collection == collection)
            .count()
    }

    /// Writes a new event into a collection, one component per file.
    pub async fn insert_event(
        &mut self,
        collection: Option<&str>,
        event: icalendar::Event,
    ) -> Result<(), Box<dyn Error>> {
        let uid = event
            .get_uid()
            .ok_or("Refusing to store an event without UID")?
            .to_string();
        if self.has_uid(&uid) {
            return Err(format!("UID already in use: {uid}").into());
        }

        let collection = self.collection(collection)?.clone();
        let path = collection.path.join(format!("{uid}.ics"));
        write_component(&path, CalendarComponent::Event(event.clone())).await?;

        self.events.insert(
            uid,
            StoredEvent {
                component: event,
                path,
                collection: collection.name,
            },
        );
        Ok(())
    }

    /// Writes a new todo into a collection, one component per file.
    pub async fn insert_todo(
        &mut self,
        collection: Option<&str>,
        todo: icalendar::Todo,
    ) -> Result<(), Box<dyn Error>> {
        let uid = todo
            .get_uid()
            .ok_or("Refusing to store a todo without UID")?
            .to_string();
        if self.has_uid(&uid) {
            return Err(format!("UID already in use: {uid}").into());
        }

        let collection = self.collection(collection)?.clone();
        let path = collection.path.join(format!("{uid}.ics"));
        write_component(&path, CalendarComponent::Todo(todo.clone())).await?;

        self.todos.insert(
            uid,
            StoredTodo {
                component: todo,
                path,
                collection: collection.name,
            },
        );
        Ok(())
    }

    /// Patches an event on disk, preserving unrelated components in its file.
    pub async fn update_event(
        &mut self,
        uid: &str,
        patch: &EventPatch,
    ) -> Result<(), Box<dyn Error>> {
        let path = self
            .events
            .get(uid)
            .map(|a| a.path.clone())
            .ok_or_else(|| format!("No such event: {uid}"))?;

        let mut calendar = read_calendar(&path).await?;
        let mut patched = None;
        for component in calendar.components.iter_mut() {
            if let CalendarComponent::Event(event) = component
                && event.get_uid() == Some(uid)
            {
                patch.apply_to(event);
                patched = Some(event.clone());
            }
        }
        let patched = patched.ok_or_else(|| format!("Event {uid} vanished from disk"))?;

        fs::write(&path, calendar.to_string()).await?;
        if let Some(stored) = self.events.get_mut(uid) {
            stored.component = patched;
        }
        Ok(())
    }

    /// Patches a todo on disk, preserving unrelated components in its file.
    pub async fn update_todo(
        &mut self,
        now: &DateTime<Local>,
        uid: &str,
        patch: &TodoPatch,
    ) -> Result<(), Box<dyn Error>> {
        let path = self
            .todos
            .get(uid)
            .map(|a| a.path.clone())
            .ok_or_else(|| format!("No such todo: {uid}"))?;

        let mut calendar = read_calendar(&path).await?;
        let mut patched = None;
        for component in calendar.components.iter_mut() {
            if let CalendarComponent::Todo(todo) = component
                && todo.get_uid() == Some(uid)
            {
                patch.apply_to(now, todo);
                patched = Some(todo.clone());
            }
        }
        let patched = patched.ok_or_else(|| format!("Todo {uid} vanished from disk"))?;

        fs::write(&path, calendar.to_string()).await?;
        if let Some(stored) = self.todos.get_mut(uid) {
            stored.component = patched;
        }
        Ok(())
    }

    /// Removes a component, deleting its file.
    pub async fn remove(&mut self, uid: &str) -> Result<Kind, Box<dyn Error>> {
        if let Some(stored) = self.events.remove(uid) {
            fs::remove_file(&stored.path).await?;
            return Ok(Kind::Event);
        }
        if let Some(stored) = self.todos.remove(uid) {
            fs::remove_file(&stored.path).await?;
            return Ok(Kind::Todo);
        }
        Err(format!("No such event or todo: {uid}").into())
    }
}

async fn read_calendar(path: &Path) -> Result<Calendar, Box<dyn Error>> {
    let content = fs::read_to_string(path).await?;
    content
        .parse()
        .map_err(|e| format!("Failed to parse {:?}: {e}", path.display()).into())
}

async fn write_component(
    path: &Path,
    component: CalendarComponent,
) -> Result<(), Box<dyn Error>> {
    let mut calendar = Calendar::new();
    calendar.push(component);
    fs::write(path, calendar.done().to_string())
        .await
        .map_err(|e| format!("Failed to write {:?}: {e}", path.display()).into())
}
