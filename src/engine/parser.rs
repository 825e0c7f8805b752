//! Descriptor parser.
//!
//! Grammar (informal):
//!
//! ```text
//! descriptor := [ event-name ] [ ":" param ( ";" param )* ]
//! param      := key [ "=" value ]
//! ```
//!
//! Keys are compared exactly (case-sensitive). `ValidTimeRange`, `Delay`,
//! `MeetCount` and `PrevMeetCount` fill dedicated fields; every other key,
//! including `Except<Param>` lists, lands in the parameter map with the last
//! write winning.
//!
//! Nothing here returns an error. A value that does not parse leaves its field
//! unset and the rest of the descriptor is still processed.

use super::report::{FieldSet, ParseDetails, RejectReason, Rejection};
use crate::split::Delimit;
use crate::{
    EVENT_SEPARATOR, EXCEPT_PREFIX, KEY_DELAY, KEY_MEET_COUNT, KEY_PREV_MEET_COUNT, KEY_VALID_TIME_RANGE,
    PARAM_SEPARATOR, RANGE_SEPARATOR, TriggerRule, VALUE_SEPARATOR,
};
use chrono::NaiveTime;
use std::time::{Duration, Instant};
use tracing::debug;

/// Single-use builder that consumes one descriptor.
#[derive(Debug, Default)]
pub(crate) struct Parser {
    rule: TriggerRule,
    /// Present only when diagnostics were requested.
    details: Option<ParseDetails>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record recognised fields and rejected tokens while parsing.
    pub fn with_details() -> Self {
        Self { rule: TriggerRule::default(), details: Some(ParseDetails::default()) }
    }

    /// Parse `descriptor` and return the rule plus any collected details.
    pub fn run(mut self, descriptor: Option<&str>) -> (TriggerRule, Option<ParseDetails>) {
        let started = Instant::now();
        let descriptor = descriptor.unwrap_or_default();

        if !descriptor.is_empty() {
            let head = descriptor.delimited(EVENT_SEPARATOR).limit(2);
            let mut parts = head.iter();

            self.rule.event_name = parts.next().unwrap_or_default().to_string();
            if !self.rule.event_name.is_empty() {
                self.mark(FieldSet::EVENT);
            }
            if let Some(params) = parts.next() {
                self.apply_params(params);
            }
        }

        if let Some(details) = self.details.as_mut() {
            details.elapsed = started.elapsed();
        }
        (self.rule, self.details)
    }

    fn apply_params(&mut self, params: &str) {
        for param in params.delimited(PARAM_SEPARATOR).remove_empty() {
            let pair = param.delimited(VALUE_SEPARATOR).limit(2).remove_empty();
            let mut it = pair.iter();
            let key = it.next().unwrap_or_default();
            let value = it.next().unwrap_or_default();
            self.apply(key, value);
        }
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key {
            KEY_VALID_TIME_RANGE => self.apply_time_range(value),
            KEY_DELAY => match parse_seconds(value) {
                Some(delay) => {
                    self.rule.delay = Some(delay);
                    self.mark(FieldSet::DELAY);
                }
                None => self.reject(key, value, RejectReason::InvalidSeconds),
            },
            KEY_MEET_COUNT => match parse_integer(value) {
                Some(n) => {
                    self.rule.meet_count = Some(n);
                    self.mark(FieldSet::MEET_COUNT);
                }
                None => self.reject(key, value, RejectReason::InvalidInteger),
            },
            KEY_PREV_MEET_COUNT => match parse_integer(value) {
                Some(n) => {
                    self.rule.prev_meet_count = Some(n);
                    self.mark(FieldSet::PREV_MEET_COUNT);
                }
                None => self.reject(key, value, RejectReason::InvalidInteger),
            },
            _ => {
                if key.starts_with(EXCEPT_PREFIX) {
                    self.mark(FieldSet::EXCLUSIONS);
                } else {
                    self.mark(FieldSet::PARAMS);
                }
                self.rule.params.insert(key.to_string(), value.to_string());
            }
        }
    }

    /// `start-end`; either side may be a placeholder such as `_`.
    fn apply_time_range(&mut self, value: &str) {
        let bounds = value.delimited(RANGE_SEPARATOR).remove_empty();
        let mut it = bounds.iter();

        if let Some(start) = it.next() {
            match parse_time_of_day(start) {
                Some(t) => {
                    self.rule.start_valid_time = Some(t);
                    self.mark(FieldSet::START_TIME);
                }
                None => self.reject(KEY_VALID_TIME_RANGE, start, RejectReason::InvalidTime),
            }
        }
        if let Some(end) = it.next() {
            match parse_time_of_day(end) {
                Some(t) => {
                    self.rule.end_valid_time = Some(t);
                    self.mark(FieldSet::END_TIME);
                }
                None => self.reject(KEY_VALID_TIME_RANGE, end, RejectReason::InvalidTime),
            }
        }
    }

    fn mark(&mut self, field: FieldSet) {
        if let Some(details) = self.details.as_mut() {
            details.recognized |= field;
        }
    }

    fn reject(&mut self, key: &str, value: &str, reason: RejectReason) {
        debug!(target: "trigline::parser", key, value, %reason, "descriptor value ignored");
        if let Some(details) = self.details.as_mut() {
            details.rejected.push(Rejection { key: key.to_string(), value: value.to_string(), reason });
        }
    }
}

/// Exact `HH:mm`, 24-hour, zero padded.
fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    if !regex!(r"^[0-9]{2}:[0-9]{2}$").is_match(text) {
        return None;
    }
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

fn parse_seconds(text: &str) -> Option<Duration> {
    text.trim().parse::<u32>().ok().map(|secs| Duration::from_secs(u64::from(secs)))
}

fn parse_integer(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}
