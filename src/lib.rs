#[macro_use]
mod macros;
mod api;
pub mod clock;
pub mod config;
pub mod debounce;
mod engine;
pub mod entry;
pub mod split;

pub use api::{ParseResultVerbose, parse, parse_optional, parse_verbose};
pub use clock::{Clock, FixedClock, WallClock};
pub use engine::{FieldSet, ParseDetails, RejectReason, Rejection, ValidWindow};
pub use entry::TriggerEntry;

use chrono::NaiveTime;
use std::collections::BTreeMap;
use std::time::Duration;

// --- Reserved descriptor keys -------------------------------------------------

/// Separator between the event name and the parameter list.
pub(crate) const EVENT_SEPARATOR: char = ':';
/// Separator between `key=value` parameters.
pub(crate) const PARAM_SEPARATOR: char = ';';
/// Separator between a parameter key and its value.
pub(crate) const VALUE_SEPARATOR: char = '=';
/// Separator between the two bounds of `ValidTimeRange`.
pub(crate) const RANGE_SEPARATOR: char = '-';
/// Separator between the values of an `Except<Param>` list.
pub(crate) const EXCLUSION_SEPARATOR: char = '|';

pub(crate) const KEY_VALID_TIME_RANGE: &str = "ValidTimeRange";
pub(crate) const KEY_DELAY: &str = "Delay";
pub(crate) const KEY_MEET_COUNT: &str = "MeetCount";
pub(crate) const KEY_PREV_MEET_COUNT: &str = "PrevMeetCount";
/// Prefix marking a parameter as the exclusion list of another parameter.
pub(crate) const EXCEPT_PREFIX: &str = "Except";

// --- Trigger rule --------------------------------------------------------------

/// A parsed trigger descriptor.
///
/// Rules are built once by [`parse`] and never change afterwards; all fields
/// are read through accessors. The default value is the empty rule produced by
/// an absent or empty descriptor.
///
/// ```
/// let rule = trigline::parse("Motion:ValidTimeRange=23:00-01:00;Room=Hall");
/// assert_eq!(rule.event_name(), "Motion");
/// assert!(rule.has_param_value_or_unset("Room", Some("Hall")));
/// assert!(rule.has_param_value_or_unset("Floor", Some("2")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerRule {
    pub(crate) event_name: String,
    pub(crate) start_valid_time: Option<NaiveTime>,
    pub(crate) end_valid_time: Option<NaiveTime>,
    pub(crate) delay: Option<Duration>,
    pub(crate) meet_count: Option<i32>,
    pub(crate) prev_meet_count: Option<i32>,
    /// Named parameters, including `Except<Param>` lists in raw form.
    pub(crate) params: BTreeMap<String, String>,
}

impl TriggerRule {
    /// The empty rule: no event name, no window, no thresholds, no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return true if this rule carries no information at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Text before the first `:`; empty when the descriptor starts with `:`.
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Inclusive lower bound of the daily window.
    pub fn start_valid_time(&self) -> Option<NaiveTime> {
        self.start_valid_time
    }

    /// Inclusive upper bound of the daily window.
    pub fn end_valid_time(&self) -> Option<NaiveTime> {
        self.end_valid_time
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    pub fn meet_count(&self) -> Option<i32> {
        self.meet_count
    }

    pub fn prev_meet_count(&self) -> Option<i32> {
        self.prev_meet_count
    }

    /// Iterate all stored parameters (exclusion lists included) in key order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
