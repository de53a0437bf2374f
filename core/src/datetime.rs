// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ops::Add;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc,
    offset::LocalResult,
};
use chrono_tz::Tz;
use icalendar::{CalendarDateTime, DatePerhapsTime};
use regex::Regex;

/// A date and time as it appears in calendar data: date only, floating time,
/// or a zoned time folded into the local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LooseDateTime {
    /// Date only without time.
    DateOnly(NaiveDate),

    /// Floating date and time without timezone.
    Floating(NaiveDateTime),

    /// Local date and time with timezone.
    /// NOTE: This is always in the local timezone of the system running the code.
    Local(DateTime<Local>),
}

impl LooseDateTime {
    /// Returns the date part.
    pub fn date(&self) -> NaiveDate {
        match self {
            LooseDateTime::DateOnly(d) => *d,
            LooseDateTime::Floating(dt) => dt.date(),
            LooseDateTime::Local(dt) => dt.date_naive(),
        }
    }

    /// Returns the time part, if available.
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            LooseDateTime::DateOnly(_) => None,
            LooseDateTime::Floating(dt) => Some(dt.time()),
            LooseDateTime::Local(dt) => Some(dt.time()),
        }
    }

    /// Converts to a datetime with default start time (00:00:00) if time is missing.
    pub fn with_start_of_day(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.date(), self.time().unwrap_or_else(start_of_day_naive))
    }

    /// Converts to a datetime with default end time (23:59:59.999999999) if time is missing.
    pub fn with_end_of_day(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.date(), self.time().unwrap_or_else(end_of_day_naive))
    }

    /// Resolves a naive local datetime, handling DST gaps and ambiguities.
    pub fn from_local_datetime(dt: NaiveDateTime) -> Self {
        match Local.from_local_datetime(&dt) {
            LocalResult::Single(dt) => dt.into(),
            LocalResult::Ambiguous(dt1, _) => {
                tracing::warn!(?dt, "ambiguous local time, picking earliest");
                dt1.into()
            }
            LocalResult::None => {
                tracing::warn!(?dt, "invalid local time, falling back to floating");
                dt.into()
            }
        }
    }

    /// Determines the position of a given datetime relative to a start and optional end date.
    pub fn position_in_range(
        t: &NaiveDateTime,
        start: &Option<LooseDateTime>,
        end: &Option<LooseDateTime>,
    ) -> RangePosition {
        match (start, end) {
            (Some(start), Some(end)) => {
                let start_dt = start.with_start_of_day();
                let end_dt = end.with_end_of_day();
                if start_dt > end_dt {
                    RangePosition::InvalidRange
                } else if t > &end_dt {
                    RangePosition::After
                } else if t < &start_dt {
                    RangePosition::Before
                } else {
                    RangePosition::InRange
                }
            }
            (Some(start), None) => match t >= &start.with_start_of_day() {
                true => RangePosition::InRange,
                false => RangePosition::Before,
            },
            (None, Some(end)) => match t > &end.with_end_of_day() {
                true => RangePosition::After,
                false => RangePosition::InRange,
            },
            (None, None) => RangePosition::InvalidRange,
        }
    }
}

impl From<DatePerhapsTime> for LooseDateTime {
    fn from(dt: DatePerhapsTime) -> Self {
        match dt {
            DatePerhapsTime::DateTime(dt) => match dt {
                CalendarDateTime::Floating(dt) => dt.into(),
                CalendarDateTime::Utc(dt) => dt.into(),
                CalendarDateTime::WithTimezone { date_time, tzid } => match tzid.parse::<Tz>() {
                    Ok(tz) => match tz.from_local_datetime(&date_time) {
                        // Use the parsed timezone to interpret the datetime
                        LocalResult::Single(dt_in_tz) => dt_in_tz.into(),
                        LocalResult::Ambiguous(dt1, _) => {
                            tracing::warn!(tzid, "ambiguous local time, picking earliest");
                            dt1.into()
                        }
                        LocalResult::None => {
                            tracing::warn!(tzid, "invalid local time, falling back to floating");
                            date_time.into()
                        }
                    },
                    Err(_) => {
                        tracing::warn!(tzid, "unknown timezone, treating as floating");
                        date_time.into()
                    }
                },
            },
            DatePerhapsTime::Date(d) => d.into(),
        }
    }
}

impl From<LooseDateTime> for DatePerhapsTime {
    fn from(dt: LooseDateTime) -> Self {
        match dt {
            LooseDateTime::DateOnly(d) => d.into(),
            LooseDateTime::Floating(dt) => CalendarDateTime::Floating(dt).into(),
            LooseDateTime::Local(dt) => match iana_time_zone::get_timezone() {
                Ok(tzid) => CalendarDateTime::WithTimezone {
                    date_time: dt.naive_local(),
                    tzid,
                }
                .into(),
                Err(_) => {
                    tracing::warn!("failed to get timezone, using UTC");
                    CalendarDateTime::Utc(dt.with_timezone(&Utc)).into()
                }
            },
        }
    }
}

impl From<NaiveDate> for LooseDateTime {
    fn from(d: NaiveDate) -> Self {
        LooseDateTime::DateOnly(d)
    }
}

impl From<NaiveDateTime> for LooseDateTime {
    fn from(dt: NaiveDateTime) -> Self {
        LooseDateTime::Floating(dt)
    }
}

impl<Tz2: TimeZone> From<DateTime<Tz2>> for LooseDateTime {
    fn from(dt: DateTime<Tz2>) -> Self {
        LooseDateTime::Local(dt.with_timezone(&Local))
    }
}

impl Add<TimeDelta> for LooseDateTime {
    type Output = Self;
    fn add(self, rhs: TimeDelta) -> Self::Output {
        match self {
            LooseDateTime::DateOnly(d) => LooseDateTime::DateOnly(d.add(rhs)),
            LooseDateTime::Floating(dt) => LooseDateTime::Floating(dt.add(rhs)),
            LooseDateTime::Local(dt) => LooseDateTime::Local(dt.add(rhs)),
        }
    }
}

/// The position of a date relative to a range defined by a start and optional end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    /// The date is before the start of the range.
    Before,

    /// The date is within the range.
    InRange,

    /// The date is after the end of the range.
    After,

    /// The range is invalid, e.g., start date is after end date.
    InvalidRange,
}

pub(crate) const fn start_of_day_naive() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("00:00:00 must exist in NaiveTime")
}

/// Using a leap second to represent the end of the day
pub(crate) const fn end_of_day_naive() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 1_999_999_999)
        .expect("23:59:59.1999999999 must exist in NaiveTime")
}

/// A point in time given relative to some "now": a keyword, an offset, a
/// concrete date or a wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeAnchor {
    /// A specific number of hours in the future or past.
    InHours(i64),

    /// A specific number of days in the future or past.
    InDays(i64),

    /// A specific date and time.
    DateTime(LooseDateTime),

    /// A specific time.
    Time(NaiveTime),
}

impl DateTimeAnchor {
    /// Represents the current time.
    pub fn now() -> Self {
        DateTimeAnchor::InHours(0)
    }

    /// Represents the current date.
    pub fn today() -> Self {
        DateTimeAnchor::InDays(0)
    }

    /// Represents tomorrow, which is one day after today.
    pub fn tomorrow() -> Self {
        DateTimeAnchor::InDays(1)
    }

    /// Represents yesterday, which is one day before today.
    pub fn yesterday() -> Self {
        DateTimeAnchor::InDays(-1)
    }

    /// Resolves the anchor at the start of its day, as a naive local datetime.
    pub fn resolve_at_start_of_day(&self, now: &DateTime<Local>) -> NaiveDateTime {
        match self {
            DateTimeAnchor::InHours(n) => now.naive_local() + TimeDelta::hours(*n),
            DateTimeAnchor::InDays(n) => {
                NaiveDateTime::new(now.date_naive() + TimeDelta::days(*n), start_of_day_naive())
            }
            DateTimeAnchor::DateTime(t) => t.with_start_of_day(),
            DateTimeAnchor::Time(t) => NaiveDateTime::new(now.date_naive(), *t),
        }
    }

    /// Resolves the anchor at the end of its day, as a naive local datetime.
    pub fn resolve_at_end_of_day(&self, now: &DateTime<Local>) -> NaiveDateTime {
        match self {
            DateTimeAnchor::InHours(n) => now.naive_local() + TimeDelta::hours(*n),
            DateTimeAnchor::InDays(n) => {
                NaiveDateTime::new(now.date_naive() + TimeDelta::days(*n), end_of_day_naive())
            }
            DateTimeAnchor::DateTime(t) => t.with_end_of_day(),
            DateTimeAnchor::Time(t) => NaiveDateTime::new(now.date_naive(), *t),
        }
    }

    /// Resolves the anchor to a concrete [`LooseDateTime`] for storage.
    ///
    /// Day offsets land at 09:00; a bare time that already passed today means
    /// the same time tomorrow.
    pub fn resolve_from(self, now: &DateTime<Local>) -> LooseDateTime {
        match self {
            DateTimeAnchor::InHours(n) => LooseDateTime::Local(*now + TimeDelta::hours(n)),
            DateTimeAnchor::InDays(n) => {
                let date = now.date_naive() + TimeDelta::days(n);
                let time = NaiveTime::from_hms_opt(9, 0, 0).expect("09:00:00 must exist");
                LooseDateTime::from_local_datetime(NaiveDateTime::new(date, time))
            }
            DateTimeAnchor::DateTime(dt) => dt,
            DateTimeAnchor::Time(t) => {
                // If the time has already passed today, use tomorrow
                let delta = if now.time() <= t {
                    TimeDelta::zero()
                } else {
                    TimeDelta::days(1)
                };
                let dt = NaiveDateTime::new(now.date_naive(), t) + delta;
                LooseDateTime::from_local_datetime(dt)
            }
        }
    }
}

impl FromStr for DateTimeAnchor {
    type Err = String;

    fn from_str(t: &str) -> Result<Self, Self::Err> {
        // Handle keywords
        match t {
            "yesterday" => return Ok(Self::yesterday()),
            "tomorrow" => return Ok(Self::tomorrow()),
            "today" => return Ok(Self::today()),
            "now" => return Ok(Self::now()),
            _ => {}
        }

        if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M") {
            Ok(Self::DateTime(LooseDateTime::from_local_datetime(dt)))
        } else if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
            Ok(Self::DateTime(LooseDateTime::DateOnly(d)))
        } else if let Ok(time) = NaiveTime::parse_from_str(t, "%H:%M") {
            Ok(Self::Time(time))
        } else if let Some(hours) = parse_hours(t) {
            Ok(Self::InHours(hours))
        } else if let Some(days) = parse_days(t) {
            Ok(Self::InDays(days))
        } else {
            Err(format!("Invalid date or offset: {t}"))
        }
    }
}

/// Parse hours from string formats like "10h", "10 hours", "10hours", "in 10hours"
fn parse_hours(s: &str) -> Option<i64> {
    const RE: &str = r"(?i)^\s*(?:in\s*)?(\d+)\s*h(?:ours)?\s*$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());
    if let Some(captures) = re.captures(s)
        && let Ok(num) = captures[1].parse::<i64>()
    {
        return Some(num);
    }

    None
}

/// Parse days from string formats like "10d", "in 10d", "in 10 days"
fn parse_days(s: &str) -> Option<i64> {
    const RE: &str = r"(?i)^\s*(?:in\s*)?(\d+)\s*d(?:ays)?\s*$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());
    if let Some(captures) = re.captures(s)
        && let Ok(num) = captures[1].parse::<i64>()
    {
        return Some(num);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, m: u32, d: u32, h: u32, mm: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|a| a.and_hms_opt(h, mm, s))
            .unwrap()
    }

    #[test]
    fn test_date_and_time_parts() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 18).unwrap();
        let time = NaiveTime::from_hms_opt(12, 30, 45).unwrap();
        let local = Local.with_ymd_and_hms(2024, 7, 18, 12, 30, 45).unwrap();

        let d1 = LooseDateTime::DateOnly(date);
        let d2 = LooseDateTime::Floating(NaiveDateTime::new(date, time));
        let d3 = LooseDateTime::Local(local);

        assert_eq!(d1.date(), date);
        assert_eq!(d2.date(), date);
        assert_eq!(d3.date(), date);

        assert_eq!(d1.time(), None);
        assert_eq!(d2.time(), Some(time));
        assert_eq!(d3.time(), Some(time));
    }

    #[test]
    fn test_with_day_boundaries() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 18).unwrap();
        let d = LooseDateTime::DateOnly(date);

        assert_eq!(
            d.with_start_of_day(),
            NaiveDateTime::new(date, NaiveTime::from_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(
            d.with_end_of_day(),
            NaiveDateTime::new(
                date,
                NaiveTime::from_hms_nano_opt(23, 59, 59, 1_999_999_999).unwrap()
            )
        );
    }

    #[test]
    fn test_position_in_range() {
        let start = LooseDateTime::DateOnly(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let end = LooseDateTime::DateOnly(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());

        let t_before = datetime(2023, 12, 31, 23, 59, 59);
        let t_in = datetime(2024, 1, 2, 12, 0, 0);
        let t_after = datetime(2024, 1, 4, 0, 0, 0);

        assert_eq!(
            LooseDateTime::position_in_range(&t_before, &Some(start), &Some(end)),
            RangePosition::Before
        );
        assert_eq!(
            LooseDateTime::position_in_range(&t_in, &Some(start), &Some(end)),
            RangePosition::InRange
        );
        assert_eq!(
            LooseDateTime::position_in_range(&t_after, &Some(start), &Some(end)),
            RangePosition::After
        );
    }

    #[test]
    fn test_position_in_range_open_ended() {
        let start = LooseDateTime::DateOnly(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let t = datetime(2024, 6, 1, 0, 0, 0);

        assert_eq!(
            LooseDateTime::position_in_range(&t, &Some(start), &None),
            RangePosition::InRange
        );
        assert_eq!(
            LooseDateTime::position_in_range(&t, &None, &None),
            RangePosition::InvalidRange
        );
    }

    #[test]
    fn test_position_in_range_invalid() {
        let start = LooseDateTime::DateOnly(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let end = LooseDateTime::DateOnly(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let t = datetime(2024, 1, 3, 12, 0, 0);

        assert_eq!(
            LooseDateTime::position_in_range(&t, &Some(start), &Some(end)),
            RangePosition::InvalidRange
        );
    }

    #[test]
    fn test_roundtrip_date_perhaps_time_floating() {
        let dt = LooseDateTime::Floating(datetime(2024, 7, 18, 12, 30, 0));
        let ical: DatePerhapsTime = dt.into();
        assert_eq!(LooseDateTime::from(ical), dt);
    }

    #[test]
    fn test_roundtrip_date_perhaps_time_dateonly() {
        let dt = LooseDateTime::DateOnly(NaiveDate::from_ymd_opt(2024, 7, 18).unwrap());
        let ical: DatePerhapsTime = dt.into();
        assert_eq!(LooseDateTime::from(ical), dt);
    }

    #[test]
    fn test_unknown_tzid_degrades_to_floating() {
        let naive = datetime(2024, 7, 18, 12, 30, 0);
        let ical = DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone {
            date_time: naive,
            tzid: "Not/AZone".to_string(),
        });
        assert_eq!(LooseDateTime::from(ical), LooseDateTime::Floating(naive));
    }

    #[test]
    fn test_add_timedelta() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let added = LooseDateTime::DateOnly(date) + TimeDelta::days(2) + TimeDelta::hours(3);
        let expected = LooseDateTime::DateOnly(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(added, expected);
    }

    #[test]
    fn test_anchor_keywords() {
        assert_eq!(
            "today".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::InDays(0)
        );
        assert_eq!(
            "tomorrow".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::InDays(1)
        );
        assert_eq!(
            "yesterday".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::InDays(-1)
        );
        assert_eq!(
            "now".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::InHours(0)
        );
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(
            "3d".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::InDays(3)
        );
        assert_eq!(
            "in 3 days".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::InDays(3)
        );
        assert_eq!(
            "10h".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::InHours(10)
        );
        assert_eq!(
            "in 10 hours".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::InHours(10)
        );
    }

    #[test]
    fn test_anchor_dates_and_times() {
        assert_eq!(
            "2025-01-03".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::DateTime(LooseDateTime::DateOnly(
                NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
            ))
        );
        assert_eq!(
            "15:00".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::Time(NaiveTime::from_hms_opt(15, 0, 0).unwrap())
        );
        assert!(matches!(
            "2025-01-03 15:00".parse::<DateTimeAnchor>().unwrap(),
            DateTimeAnchor::DateTime(_)
        ));
    }

    #[test]
    fn test_anchor_invalid() {
        assert!("soonish".parse::<DateTimeAnchor>().is_err());
        assert!("25:00".parse::<DateTimeAnchor>().is_err());
    }

    #[test]
    fn test_anchor_resolution() {
        let now = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

        let start = DateTimeAnchor::today().resolve_at_start_of_day(&now);
        assert_eq!(start, datetime(2025, 1, 1, 0, 0, 0));

        let end = DateTimeAnchor::tomorrow().resolve_at_end_of_day(&now);
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());

        // A bare time that already passed today resolves to tomorrow
        let t = DateTimeAnchor::Time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let resolved = t.resolve_from(&now);
        assert_eq!(resolved.date(), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }
}
