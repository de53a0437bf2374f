// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use bimap::BiBTreeMap;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{Config, Event, EventStatus, Id, LooseDateTime, Priority, Todo, TodoStatus};

/// A thread-safe structure for mapping UIDs to display numbers.
///
/// If a UID is not found, a new display number (1, 2, 3, ...) is allocated.
#[derive(Debug, Clone)]
pub struct ShortIdMap {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Inner {
    map: BiBTreeMap<String, NonZeroU32>,
    next: NonZeroU32,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            map: BiBTreeMap::new(),
            next: NonZeroU32::new(1).expect("Failed to create NonZeroU32"),
        }
    }
}

impl ShortIdMap {
    fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    /// Load the map from disk.
    ///
    /// If the file does not exist or is corrupt, a new map is returned.
    pub async fn load_or_new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match Self::get_map_path(config) {
            Some(a) => a,
            None => {
                tracing::warn!("No state directory configured, using empty map");
                return Ok(Self::new());
            }
        };

        match fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<Inner>(&content) {
                Ok(inner) => {
                    tracing::debug!("Loaded existing map from disk: {:?}", path.display());
                    Ok(Self {
                        inner: Arc::new(RwLock::new(inner)),
                    })
                }
                Err(e) => {
                    tracing::warn!("Failed to parse existing map: {e}");
                    Ok(Self::new())
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Dump the map to disk.
    pub async fn dump(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::get_map_path(config).ok_or("No state directory configured")?;
        let content = {
            let inner = self.inner.read().unwrap();
            serde_json::to_string(&*inner)?
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// Get or allocate a display number for the given uid.
    ///
    /// If the UID is not already in the map, a new number is assigned and returned.
    pub fn get_or_assign_short_id(&self, uid: &str) -> NonZeroU32 {
        // First try read-only access
        {
            let inner = self.inner.read().unwrap();
            if let Some(&id) = inner.map.get_by_left(uid) {
                return id;
            }
        }

        // Upgrade to write lock when needed
        let mut inner = self.inner.write().unwrap();
        if let Some(&id) = inner.map.get_by_left(uid) {
            return id; // Check again in the write lock
        }

        let id = inner.next;
        inner.next = inner.next.saturating_add(1);
        inner.map.insert(uid.to_string(), id);
        id
    }

    /// Resolve user input to a UID, looking up short ids when allowed.
    pub fn get_uid(&self, id: Id) -> String {
        if let Id::ShortIdOrUid(uid) = &id
            && let Ok(short_id) = uid.parse::<NonZeroU32>()
        {
            let uid = self
                .inner
                .read()
                .unwrap()
                .map
                .get_by_right(&short_id)
                .cloned();

            if let Some(uid) = uid {
                return uid;
            }
        }

        match id {
            Id::Uid(uid) => uid,
            Id::ShortIdOrUid(uid) => uid,
        }
    }

    fn get_map_path(config: &Config) -> Option<PathBuf> {
        config.state_dir.as_ref().map(|a| a.join("short_id.json"))
    }
}

/// An event paired with its display number.
#[derive(Debug)]
pub struct EventWithShortId<E: Event> {
    pub inner: E,
    pub short_id: NonZeroU32,
}

impl<E: Event> EventWithShortId<E> {
    pub fn with(map: &ShortIdMap, event: E) -> Self {
        let short_id = match event.short_id() {
            Some(short_id) => short_id,
            None => map.get_or_assign_short_id(event.uid()),
        };

        Self {
            inner: event,
            short_id,
        }
    }
}

impl<E: Event> Event for EventWithShortId<E> {
    fn short_id(&self) -> Option<NonZeroU32> {
        Some(self.short_id)
    }

    fn uid(&self) -> &str {
        self.inner.uid()
    }

    fn summary(&self) -> &str {
        self.inner.summary()
    }

    fn description(&self) -> Option<&str> {
        self.inner.description()
    }

    fn location(&self) -> Option<&str> {
        self.inner.location()
    }

    fn start(&self) -> Option<LooseDateTime> {
        self.inner.start()
    }

    fn end(&self) -> Option<LooseDateTime> {
        self.inner.end()
    }

    fn status(&self) -> Option<EventStatus> {
        self.inner.status()
    }
}

/// A todo paired with its display number.
#[derive(Debug)]
pub struct TodoWithShortId<T: Todo> {
    pub inner: T,
    pub short_id: NonZeroU32,
}

impl<T: Todo> TodoWithShortId<T> {
    pub fn with(map: &ShortIdMap, todo: T) -> Self {
        let short_id = match todo.short_id() {
            Some(short_id) => short_id,
            None => map.get_or_assign_short_id(todo.uid()),
        };

        Self {
            inner: todo,
            short_id,
        }
    }
}

impl<T: Todo> Todo for TodoWithShortId<T> {
    fn short_id(&self) -> Option<NonZeroU32> {
        Some(self.short_id)
    }
    fn uid(&self) -> &str {
        self.inner.uid()
    }
    fn summary(&self) -> &str {
        self.inner.summary()
    }
    fn description(&self) -> Option<&str> {
        self.inner.description()
    }
    fn due(&self) -> Option<LooseDateTime> {
        self.inner.due()
    }
    fn completed(&self) -> Option<DateTime<Local>> {
        self.inner.completed()
    }
    fn percent_complete(&self) -> Option<u8> {
        self.inner.percent_complete()
    }
    fn priority(&self) -> Priority {
        self.inner.priority()
    }
    fn status(&self) -> Option<TodoStatus> {
        self.inner.status()
    }
}
