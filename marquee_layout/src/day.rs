// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-day keys and timestamp parsing.

use core::fmt;

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

/// Calendar day an axis cell is bucketed by.
///
/// `Unknown` sorts before every real day: items without a usable timestamp
/// are treated as the oldest content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayKey {
    /// Sentinel bucket for items without a parseable timestamp.
    Unknown,
    /// A calendar day in the partitioner's time zone.
    Day(NaiveDate),
}

impl DayKey {
    /// Returns the date, if this is a real day.
    #[must_use]
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Unknown => None,
            Self::Day(d) => Some(d),
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Time zone used to derive calendar days.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Zone {
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    /// Fixed offset when `minutes` is given and in range, host local zone otherwise.
    pub(crate) fn from_offset_minutes(minutes: Option<i32>) -> Self {
        minutes
            .and_then(|m| m.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .map_or(Self::Local, Self::Fixed)
    }

    fn date_of(self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Fixed(offset) => instant.with_timezone(&offset).date_naive(),
        }
    }

    fn resolve(self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// A parsed timestamp: its calendar day and an ordering key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Stamp {
    pub(crate) day: NaiveDate,
    pub(crate) millis: i64,
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parses a source timestamp.
///
/// Accepts RFC 3339, RFC 2822 (common in feeds), zone-less date-times and bare
/// dates. Zone-less values are interpreted in `zone`. Returns `None` for
/// anything else.
pub(crate) fn parse_timestamp(raw: &str, zone: Zone) -> Option<Stamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let instant = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .or_else(|| {
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .ok()
                        .map(|d| d.and_time(NaiveTime::MIN))
                })
                .and_then(|naive| zone.resolve(naive))
        })?;
    Some(Stamp {
        day: zone.date_of(instant),
        millis: instant.timestamp_millis(),
    })
}
