//! Read-only queries over a parsed [`TriggerRule`].
//!
//! Parameter matching treats a rule that does not mention a parameter as a
//! wildcard for it. Exclusion lists (`Except<Param>=a|b|c`) veto values
//! regardless of whether a positive value is configured, and a veto always
//! wins over a positive match.

use super::window::ValidWindow;
use crate::clock::Clock;
use crate::split::{Delimit, Segments};
use crate::{EXCEPT_PREFIX, EXCLUSION_SEPARATOR, TriggerRule};
use chrono::NaiveDateTime;

impl TriggerRule {
    /// The daily window described by `ValidTimeRange`.
    pub fn valid_window(&self) -> ValidWindow {
        ValidWindow::new(self.start_valid_time, self.end_valid_time)
    }

    /// Return true if `now` falls inside the rule's daily window.
    ///
    /// `now` must be wall-clock time in the zone the descriptor's `HH:mm`
    /// bounds were written for; see [`Clock`].
    pub fn is_in_valid_time(&self, now: NaiveDateTime) -> bool {
        self.valid_window().contains(now)
    }

    /// [`is_in_valid_time`](Self::is_in_valid_time) against `clock`'s current time.
    pub fn is_in_valid_time_on<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        self.is_in_valid_time(clock.now())
    }

    /// Raw parameter lookup. Exclusion lists are not consulted.
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// True if `name` is unset or set to exactly `value`, and `value` is not
    /// excluded for `name`.
    pub fn has_param_value_or_unset(&self, name: &str, value: Option<&str>) -> bool {
        let matches = match self.get_param_value(name) {
            None => true,
            Some(stored) => value == Some(stored),
        };
        matches && !self.is_excluded(name, value)
    }

    /// True if `Except<name>` lists `value`. An absent value only matches an
    /// explicitly empty entry in the list.
    pub fn is_excluded(&self, name: &str, value: Option<&str>) -> bool {
        let value = value.unwrap_or_default();
        self.exclusions(name).is_some_and(|mut list| list.any(|excluded| excluded == value))
    }

    /// Entries of the `Except<name>` list, if the rule has one.
    pub fn exclusions(&self, name: &str) -> Option<Segments<'_>> {
        let key = format!("{EXCEPT_PREFIX}{name}");
        self.params.get(&key).map(|list| list.delimited(EXCLUSION_SEPARATOR).iter())
    }

    /// Firing decision for runtime context: `now` is inside the window and every
    /// `(name, value)` pair passes [`has_param_value_or_unset`](Self::has_param_value_or_unset).
    pub fn permits(&self, now: NaiveDateTime, params: &[(&str, Option<&str>)]) -> bool {
        self.is_in_valid_time(now) && params.iter().all(|(name, value)| self.has_param_value_or_unset(name, *value))
    }
}
