//! Reference clocks for window checks.
//!
//! Descriptor bounds are bare `HH:mm` wall-clock times with no zone attached,
//! so "is it inside the window now?" depends on which wall clock is asked.
//! Callers pick one explicitly instead of the engine assuming UTC or local
//! time behind their back.

use chrono::{FixedOffset, Local, NaiveDateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The system clock read in a chosen zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallClock {
    #[default]
    Utc,
    Local,
    /// A fixed offset from UTC, e.g. `+02:00`.
    Offset(FixedOffset),
}

impl Clock for WallClock {
    fn now(&self) -> NaiveDateTime {
        match self {
            WallClock::Utc => Utc::now().naive_utc(),
            WallClock::Local => Local::now().naive_local(),
            WallClock::Offset(offset) => Utc::now().with_timezone(offset).naive_local(),
        }
    }
}

/// Error returned when a clock name is not `utc`, `local` or `±HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown clock '{0}' (expected utc, local or an offset like +02:00)")]
pub struct UnknownClock(pub String);

impl FromStr for WallClock {
    type Err = UnknownClock;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "utc" | "z" => return Ok(WallClock::Utc),
            "local" => return Ok(WallClock::Local),
            _ => {}
        }
        parse_offset(trimmed).map(WallClock::Offset).ok_or_else(|| UnknownClock(s.to_string()))
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WallClock::Utc => f.write_str("utc"),
            WallClock::Local => f.write_str("local"),
            WallClock::Offset(offset) => write!(f, "{offset}"),
        }
    }
}

/// `+HH:MM` / `-HH:MM`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let caps = regex!(r"^([+-])([0-9]{2}):([0-9]{2})$").captures(text)?;
    let hours: i32 = caps[2].parse().ok()?;
    let minutes: i32 = caps[3].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let secs = (hours * 3600 + minutes * 60) * if &caps[1] == "-" { -1 } else { 1 };
    FixedOffset::east_opt(secs)
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
