// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Duration, Local, Timelike};
use icalendar::{Component, EventLike};

use crate::{DateTimeAnchor, LooseDateTime};

pub(crate) const KEY_DESCRIPTION: &str = "DESCRIPTION";
pub(crate) const KEY_LOCATION: &str = "LOCATION";
pub(crate) const KEY_DTSTART: &str = "DTSTART";
pub(crate) const KEY_DTEND: &str = "DTEND";

/// Trait representing a calendar event.
pub trait Event {
    /// The short identifier for the event.
    /// It will be `None` if the event does not have a short ID.
    /// It is used for display purposes and may not be unique.
    fn short_id(&self) -> Option<NonZeroU32> {
        None
    }

    /// The unique identifier for the event.
    fn uid(&self) -> &str;

    /// The summary of the event.
    fn summary(&self) -> &str;

    /// The description of the event, if available.
    fn description(&self) -> Option<&str>;

    /// The location of the event, if available.
    fn location(&self) -> Option<&str>;

    /// The start date and time of the event, if available.
    fn start(&self) -> Option<LooseDateTime>;

    /// The end date and time of the event, if available.
    fn end(&self) -> Option<LooseDateTime>;

    /// The status of the event, if available.
    fn status(&self) -> Option<EventStatus>;
}

impl Event for icalendar::Event {
    fn uid(&self) -> &str {
        self.get_uid().unwrap_or_default()
    }

    fn summary(&self) -> &str {
        self.get_summary().unwrap_or_default()
    }

    fn description(&self) -> Option<&str> {
        self.get_description()
    }

    fn location(&self) -> Option<&str> {
        self.property_value(KEY_LOCATION)
    }

    fn start(&self) -> Option<LooseDateTime> {
        self.get_start().map(Into::into)
    }

    fn end(&self) -> Option<LooseDateTime> {
        self.get_end().map(Into::into)
    }

    fn status(&self) -> Option<EventStatus> {
        self.get_status().map(EventStatus::from)
    }
}

/// Draft for an event, used for creating new events.
#[derive(Debug)]
pub struct EventDraft {
    /// The summary of the event.
    pub summary: String,

    /// The description of the event, if available.
    pub description: Option<String>,

    /// The location of the event, if available.
    pub location: Option<String>,

    /// The start date and time of the event, if available.
    pub start: Option<LooseDateTime>,

    /// The end date and time of the event, if available.
    pub end: Option<LooseDateTime>,

    /// The status of the event.
    pub status: EventStatus,
}

impl EventDraft {
    /// Creates a draft prefilled with the next half-hour slot.
    pub(crate) fn default(now: DateTime<Local>) -> Self {
        // next 00 or 30 minute
        let start = if now.minute() < 30 {
            now.with_minute(30).unwrap().with_second(0).unwrap()
        } else {
            (now + Duration::hours(1))
                .with_minute(0)
                .unwrap()
                .with_second(0)
                .unwrap()
        };

        Self {
            summary: String::new(),
            description: None,
            location: None,
            start: Some(start.into()),
            end: Some((start + Duration::hours(1)).into()),
            status: EventStatus::default(),
        }
    }

    /// Converts the draft into an icalendar Event component.
    pub(crate) fn into_ics(self, now: &DateTime<Local>, uid: &str) -> icalendar::Event {
        let mut event = icalendar::Event::new();
        Component::uid(&mut event, uid);

        Component::summary(&mut event, &self.summary);

        if let Some(description) = self.description {
            Component::description(&mut event, &description);
        }

        if let Some(location) = self.location {
            event.add_property(KEY_LOCATION, location);
        }

        let default_duration = Duration::hours(1);
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            (None, Some(end)) => {
                // If start is not specified, but end is, set start to end - duration
                let start = match end {
                    LooseDateTime::DateOnly(d) => d.into(),
                    LooseDateTime::Floating(dt) => (dt - default_duration).into(),
                    LooseDateTime::Local(dt) => (dt - default_duration).into(),
                };
                (start, end)
            }
            (Some(start), None) => {
                // If end is not specified, but start is, set it to start + duration
                let end = match start {
                    LooseDateTime::DateOnly(d) => d.into(),
                    LooseDateTime::Floating(dt) => (dt + default_duration).into(),
                    LooseDateTime::Local(dt) => (dt + default_duration).into(),
                };
                (start, end)
            }
            (None, None) => {
                let start = *now;
                let end = (start + default_duration).into();
                (start.into(), end)
            }
        };
        EventLike::starts(&mut event, start);
        EventLike::ends(&mut event, end);

        icalendar::Event::status(&mut event, self.status.into());

        event
    }
}

/// Patch for an event, allowing partial updates.
#[derive(Debug, Default, Clone)]
pub struct EventPatch {
    /// The summary of the event, if available.
    pub summary: Option<String>,

    /// The description of the event, if available.
    pub description: Option<Option<String>>,

    /// The location of the event, if available.
    pub location: Option<Option<String>>,

    /// The start date and time of the event, if available.
    pub start: Option<Option<LooseDateTime>>,

    /// The end date and time of the event, if available.
    pub end: Option<Option<LooseDateTime>>,

    /// The status of the event, if available.
    pub status: Option<EventStatus>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.status.is_none()
    }

    /// Applies the patch to a mutable event, modifying it in place.
    pub(crate) fn apply_to<'a>(&self, e: &'a mut icalendar::Event) -> &'a mut icalendar::Event {
        if let Some(summary) = &self.summary {
            e.summary(summary);
        }

        if let Some(description) = &self.description {
            match description {
                Some(desc) => {
                    e.description(desc);
                }
                None => {
                    e.remove_property(KEY_DESCRIPTION);
                }
            };
        }

        if let Some(location) = &self.location {
            e.remove_property(KEY_LOCATION);
            if let Some(loc) = location {
                e.add_property(KEY_LOCATION, loc);
            }
        }

        if let Some(start) = &self.start {
            match start {
                Some(s) => {
                    e.starts(*s);
                }
                None => {
                    e.remove_property(KEY_DTSTART);
                }
            };
        }

        if let Some(end) = &self.end {
            match end {
                Some(ed) => {
                    e.ends(*ed);
                }
                None => {
                    e.remove_property(KEY_DTEND);
                }
            };
        }

        if let Some(status) = self.status {
            e.status(status.into());
        }

        e
    }
}

/// The status of an event, which can be tentative, confirmed, or cancelled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EventStatus {
    /// The event is tentative.
    Tentative,

    /// The event is confirmed.
    #[default]
    Confirmed,

    /// The event is cancelled.
    Cancelled,
}

const STATUS_TENTATIVE: &str = "TENTATIVE";
const STATUS_CONFIRMED: &str = "CONFIRMED";
const STATUS_CANCELLED: &str = "CANCELLED";

impl AsRef<str> for EventStatus {
    fn as_ref(&self) -> &str {
        match self {
            EventStatus::Tentative => STATUS_TENTATIVE,
            EventStatus::Confirmed => STATUS_CONFIRMED,
            EventStatus::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_TENTATIVE => Ok(EventStatus::Tentative),
            STATUS_CONFIRMED => Ok(EventStatus::Confirmed),
            STATUS_CANCELLED => Ok(EventStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl From<EventStatus> for icalendar::EventStatus {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Tentative => icalendar::EventStatus::Tentative,
            EventStatus::Confirmed => icalendar::EventStatus::Confirmed,
            EventStatus::Cancelled => icalendar::EventStatus::Cancelled,
        }
    }
}

impl From<icalendar::EventStatus> for EventStatus {
    fn from(status: icalendar::EventStatus) -> Self {
        match status {
            icalendar::EventStatus::Tentative => EventStatus::Tentative,
            icalendar::EventStatus::Confirmed => EventStatus::Confirmed,
            icalendar::EventStatus::Cancelled => EventStatus::Cancelled,
        }
    }
}

/// Conditions for filtering events in a calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventConditions {
    /// Events ending before this will be excluded.
    pub startable: Option<DateTimeAnchor>,

    /// The cutoff date and time, events starting after this will be excluded.
    pub cutoff: Option<DateTimeAnchor>,
}

#[derive(Debug)]
pub(crate) struct ParsedEventConditions {
    /// The date and time before which the event must start
    pub start_before: Option<chrono::NaiveDateTime>,

    /// The date and time after which the event must end
    pub end_after: Option<chrono::NaiveDateTime>,
}

impl ParsedEventConditions {
    pub fn parse(now: &DateTime<Local>, conds: &EventConditions) -> Self {
        Self {
            start_before: conds.cutoff.map(|w| w.resolve_at_end_of_day(now)),
            end_after: conds.startable.map(|w| w.resolve_at_start_of_day(now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_draft_default_rounds_to_half_hour() {
        let now = Local.with_ymd_and_hms(2025, 1, 1, 10, 10, 0).unwrap();
        let draft = EventDraft::default(now);
        let start = draft.start.unwrap();
        assert_eq!(start.time().unwrap().minute(), 30);

        let now = Local.with_ymd_and_hms(2025, 1, 1, 10, 40, 0).unwrap();
        let draft = EventDraft::default(now);
        let start = draft.start.unwrap();
        assert_eq!(start.time().unwrap().hour(), 11);
        assert_eq!(start.time().unwrap().minute(), 0);
    }

    #[test]
    fn test_draft_into_ics() {
        let now = Local.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let draft = EventDraft {
            summary: "Standup".to_string(),
            description: Some("Daily sync".to_string()),
            location: Some("Room 3".to_string()),
            start: Some(now.into()),
            end: None,
            status: EventStatus::Confirmed,
        };
        let event = draft.into_ics(&now, "uid-1");

        assert_eq!(Event::uid(&event), "uid-1");
        assert_eq!(Event::summary(&event), "Standup");
        assert_eq!(Event::description(&event), Some("Daily sync"));
        assert_eq!(Event::location(&event), Some("Room 3"));
        assert!(Event::start(&event).is_some());
        // end defaults to one hour after start
        assert!(Event::end(&event).is_some());
        assert_eq!(Event::status(&event), Some(EventStatus::Confirmed));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(EventPatch::default().is_empty());
        let patch = EventPatch {
            summary: Some("New".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_apply() {
        let now = Local.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let draft = EventDraft {
            summary: "Old".to_string(),
            description: Some("desc".to_string()),
            location: None,
            start: Some(now.into()),
            end: None,
            status: EventStatus::Confirmed,
        };
        let mut event = draft.into_ics(&now, "uid-1");

        let patch = EventPatch {
            summary: Some("New".to_string()),
            description: Some(None),
            location: Some(Some("Hall".to_string())),
            status: Some(EventStatus::Cancelled),
            ..Default::default()
        };
        patch.apply_to(&mut event);

        assert_eq!(Event::summary(&event), "New");
        assert_eq!(Event::description(&event), None);
        assert_eq!(Event::location(&event), Some("Hall"));
        assert_eq!(Event::status(&event), Some(EventStatus::Cancelled));
    }

    #[test]
    fn test_status_str_roundtrip() {
        for s in [
            EventStatus::Tentative,
            EventStatus::Confirmed,
            EventStatus::Cancelled,
        ] {
            assert_eq!(s.as_ref().parse::<EventStatus>(), Ok(s));
        }
        assert!("DRAFT".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_parsed_conditions() {
        let now = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let conds = EventConditions {
            startable: Some(DateTimeAnchor::today()),
            cutoff: Some(DateTimeAnchor::InDays(2)),
        };
        let parsed = ParsedEventConditions::parse(&now, &conds);
        assert!(parsed.end_after.unwrap() < parsed.start_before.unwrap());
    }
}
