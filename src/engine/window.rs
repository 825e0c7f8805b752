//! Daily validity windows.
//!
//! A window is an inclusive `[start, end]` pair of times of day, each bound
//! optional. A missing bound is open: start falls back to the earliest
//! representable instant and end to the latest one.
//!
//! When both bounds are present and `start > end` the window crosses
//! midnight. It is then anchored on the day it opens:
//!
//! ```text
//!        day D                       day D+1
//! 00:00 ─────────── 23:00 ═══════ 00:00 ═══ 01:00 ─────────
//!                   start                    end
//! ```
//!
//! so a check at 00:30 on day D+1 falls inside the window opened on day D.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Inclusive daily time window with optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidWindow {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl ValidWindow {
    pub fn new(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        Self { start, end }
    }

    /// True when neither bound is set: every instant is inside.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True when both bounds are set and the window wraps past midnight.
    pub fn crosses_midnight(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Concrete bounds of the window that opens on `date`.
    ///
    /// Missing bounds resolve to `NaiveDateTime::MIN` / `NaiveDateTime::MAX`;
    /// for a window crossing midnight the end moves to the following day.
    pub fn bounds_on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.start.map_or(NaiveDateTime::MIN, |t| date.and_time(t));
        let mut end = self.end.map_or(NaiveDateTime::MAX, |t| date.and_time(t));

        if self.crosses_midnight() {
            end = end.checked_add_signed(TimeDelta::days(1)).unwrap_or(NaiveDateTime::MAX);
        }
        (start, end)
    }

    /// Return true if `now` lies inside the window opened today or, for a
    /// window crossing midnight, the one opened yesterday.
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        let within = |date: NaiveDate| {
            let (start, end) = self.bounds_on(date);
            start <= now && now <= end
        };

        if within(now.date()) {
            return true;
        }
        self.crosses_midnight() && now.date().pred_opt().is_some_and(within)
    }
}
