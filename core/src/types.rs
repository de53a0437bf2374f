// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;

/// Identifier accepted on the command line: either a full iCalendar UID, or a
/// string that may be a short id allocated by [`crate::ShortIdMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Id {
    /// A full UID, no short-id lookup is attempted.
    Uid(String),

    /// User input, resolved as a short id first and as a UID otherwise.
    ShortIdOrUid(String),
}

impl Id {
    /// The raw string, interpreted as a UID.
    pub fn as_uid(&self) -> &str {
        match self {
            Id::Uid(uid) => uid,
            Id::ShortIdOrUid(uid) => uid,
        }
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_uid())
    }
}

/// What kind of component an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A VEVENT component.
    Event,

    /// A VTODO component.
    Todo,
}

/// Sort order, either ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,

    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Applies the order to an already-ascending comparison result.
    pub(crate) fn apply(&self, ord: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Pagination with a limit and an offset.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    /// The maximum number of items to return.
    pub limit: i64,

    /// The number of items to skip before starting to collect the result set.
    pub offset: i64,
}

impl From<(i64, i64)> for Pager {
    fn from((limit, offset): (i64, i64)) -> Self {
        Pager { limit, offset }
    }
}

/// Priority of a task or item, with values ranging from 1 to 9, and None for no priority.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Priority {
    /// No priority.
    #[default]
    #[cfg_attr(feature = "clap", clap(name = "none", alias = "0"))]
    #[serde(rename = "none", alias = "0")]
    None,

    /// Priority 1, highest priority.
    #[cfg_attr(feature = "clap", clap(name = "1", hide = true))]
    #[serde(rename = "1")]
    P1,

    /// Priority 2, high priority.
    #[cfg_attr(feature = "clap", clap(name = "high", alias = "2"))]
    #[serde(rename = "2", alias = "high")]
    P2,

    /// Priority 3.
    #[cfg_attr(feature = "clap", clap(name = "3", hide = true))]
    #[serde(rename = "3")]
    P3,

    /// Priority 4.
    #[cfg_attr(feature = "clap", clap(name = "4", hide = true))]
    #[serde(rename = "4")]
    P4,

    /// Priority 5, medium priority.
    #[cfg_attr(feature = "clap", clap(name = "mid", alias = "5"))]
    #[serde(rename = "5", alias = "mid")]
    P5,

    /// Priority 6.
    #[cfg_attr(feature = "clap", clap(name = "6", hide = true))]
    #[serde(rename = "6")]
    P6,

    /// Priority 7.
    #[cfg_attr(feature = "clap", clap(name = "7", hide = true))]
    #[serde(rename = "7")]
    P7,

    /// Priority 8, low priority.
    #[cfg_attr(feature = "clap", clap(name = "low", alias = "8"))]
    #[serde(rename = "8", alias = "low")]
    P8,

    /// Priority 9, lowest priority.
    #[cfg_attr(feature = "clap", clap(name = "9", hide = true))]
    #[serde(rename = "9")]
    P9,
}

impl Priority {
    /// Key for ascending sorts, where 1 is the most urgent and None goes last.
    pub(crate) fn sort_key(&self) -> u8 {
        match self {
            Priority::None => 10,
            other => (*other).into(),
        }
    }
}

impl From<u32> for Priority {
    fn from(value: u32) -> Self {
        match value {
            1 => Priority::P1,
            2 => Priority::P2,
            3 => Priority::P3,
            4 => Priority::P4,
            5 => Priority::P5,
            6 => Priority::P6,
            7 => Priority::P7,
            8 => Priority::P8,
            9 => Priority::P9,
            _ => Priority::None,
        }
    }
}

impl From<u8> for Priority {
    fn from(value: u8) -> Self {
        u32::from(value).into()
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        match value {
            Priority::None => 0,
            Priority::P1 => 1,
            Priority::P2 => 2,
            Priority::P3 => 3,
            Priority::P4 => 4,
            Priority::P5 => 5,
            Priority::P6 => 6,
            Priority::P7 => 7,
            Priority::P8 => 8,
            Priority::P9 => 9,
        }
    }
}

impl From<Priority> for u32 {
    fn from(value: Priority) -> Self {
        u8::from(value).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_roundtrip() {
        for n in 0u32..=9 {
            let p = Priority::from(n);
            assert_eq!(u32::from(p), n);
        }
    }

    #[test]
    fn test_priority_out_of_range() {
        assert_eq!(Priority::from(10u32), Priority::None);
        assert_eq!(Priority::from(255u32), Priority::None);
    }

    #[test]
    fn test_priority_sort_key_none_last() {
        assert!(Priority::P9.sort_key() < Priority::None.sort_key());
        assert!(Priority::P1.sort_key() < Priority::P9.sort_key());
    }

    #[test]
    fn test_id_as_uid() {
        assert_eq!(Id::Uid("abc".into()).as_uid(), "abc");
        assert_eq!(Id::ShortIdOrUid("12".into()).as_uid(), "12");
    }

    #[test]
    fn test_pager_from_tuple() {
        let pager: Pager = (16, 32).into();
        assert_eq!(pager.limit, 16);
        assert_eq!(pager.offset, 32);
    }
}
