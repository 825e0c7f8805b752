//! Parse diagnostics.
//!
//! Parsing degrades silently: a `Delay=soon` simply leaves the delay unset, and
//! rule consumers cannot tell "not given" from "not understood". Operators
//! debugging a descriptor do want to tell them apart, so the parser can
//! optionally record what it recognised and what it dropped.
//!
//! Collection is opt-in (see `Parser::with_details`): the plain `parse` path
//! allocates nothing here.

use std::fmt;
use std::time::Duration;

bitflags::bitflags! {
    /// Fields that received a value while parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldSet: u16 {
        const EVENT           = 1 << 0;
        const START_TIME      = 1 << 1;
        const END_TIME        = 1 << 2;
        const DELAY           = 1 << 3;
        const MEET_COUNT      = 1 << 4;
        const PREV_MEET_COUNT = 1 << 5;
        /// At least one ordinary named parameter.
        const PARAMS          = 1 << 6;
        /// At least one `Except<Param>` list.
        const EXCLUSIONS      = 1 << 7;
    }
}

impl FieldSet {
    /// Human-readable names of the set flags, in declaration order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "EVENT" => "event",
                "START_TIME" => "start time",
                "END_TIME" => "end time",
                "DELAY" => "delay",
                "MEET_COUNT" => "meet count",
                "PREV_MEET_COUNT" => "prev meet count",
                "PARAMS" => "params",
                "EXCLUSIONS" => "exclusions",
                other => other,
            })
            .collect()
    }
}

/// Why a token was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Not an exact `HH:mm` time of day.
    InvalidTime,
    /// Not a non-negative whole number of seconds.
    InvalidSeconds,
    /// Not a 32-bit integer.
    InvalidInteger,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::InvalidTime => "expected HH:mm",
            RejectReason::InvalidSeconds => "expected whole seconds",
            RejectReason::InvalidInteger => "expected integer",
        };
        f.write_str(s)
    }
}

/// A descriptor token that left its field unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Key the value belonged to (`ValidTimeRange` for both bounds).
    pub key: String,
    /// The offending text.
    pub value: String,
    pub reason: RejectReason,
}

/// Diagnostics from [`parse_verbose`](crate::parse_verbose).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDetails {
    pub recognized: FieldSet,
    pub rejected: Vec<Rejection>,
    /// Wall time spent parsing.
    pub elapsed: Duration,
}
