//! Meet-count debouncing for repeatedly evaluated rules.
//!
//! A scheduler re-evaluates a rule's condition on every tick. `MeetCount`
//! says how many consecutive positive observations are needed before the
//! trigger fires; `PrevMeetCount` says how many consecutive negative
//! observations after firing are needed before the condition is considered
//! gone again (the falling edge).
//!
//! # State Machine
//!
//! ```text
//!            met (n < meet)               met (n == meet)
//!  Idle ─────────────────────► Counting ─────────────────► Fired
//!   ▲                            │                          │ ▲
//!   │         not met            │              not met     │ │ met
//!   └────────────────────────────┘        (n < prev) ──► Releasing
//!   ▲                                                       │
//!   └──────────────── not met (n == prev) ──────────────────┘
//! ```
//!
//! [`MeetTracker::observe`] returns a [`MeetStatus`] describing the step so
//! callers can act on the edges (`Triggered`, `Resolved`) they care about.

use crate::TriggerRule;

/// Outcome of one [`MeetTracker::observe`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetStatus {
    /// Condition not met and nothing pending.
    Idle,
    /// Condition met, but fewer than `meet_count` times in a row.
    Pending { observed: u32 },
    /// Threshold just reached. Returned once per episode.
    Triggered,
    /// Already fired and the condition still holds.
    Active,
    /// Fired, condition lost fewer than `prev_meet_count` times in a row.
    Releasing { missed: u32 },
    /// The falling edge: fired episode just ended. Returned once.
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Counting(u32),
    Fired,
    Releasing(u32),
}

/// Consecutive-observation counter driven by a rule's meet counts.
#[derive(Debug, Clone)]
pub struct MeetTracker {
    meet: u32,
    prev_meet: u32,
    state: State,
}

impl MeetTracker {
    /// Thresholds below 1 are treated as 1.
    pub fn new(meet_count: Option<i32>, prev_meet_count: Option<i32>) -> Self {
        Self { meet: threshold(meet_count), prev_meet: threshold(prev_meet_count), state: State::Idle }
    }

    pub fn for_rule(rule: &TriggerRule) -> Self {
        Self::new(rule.meet_count(), rule.prev_meet_count())
    }

    /// Feed one observation of the rule's condition.
    pub fn observe(&mut self, met: bool) -> MeetStatus {
        let (next, status) = match (self.state, met) {
            (State::Idle, false) | (State::Counting(_), false) => (State::Idle, MeetStatus::Idle),
            (State::Idle, true) => self.count(1),
            (State::Counting(n), true) => self.count(n + 1),
            (State::Fired, true) | (State::Releasing(_), true) => (State::Fired, MeetStatus::Active),
            (State::Fired, false) => self.miss(1),
            (State::Releasing(n), false) => self.miss(n + 1),
        };
        self.state = next;
        status
    }

    /// Consecutive positive observations needed to fire.
    pub fn meet_threshold(&self) -> u32 {
        self.meet
    }

    /// Consecutive negative observations needed to end a fired episode.
    pub fn release_threshold(&self) -> u32 {
        self.prev_meet
    }

    /// Return true while the trigger is in its fired episode.
    pub fn is_fired(&self) -> bool {
        matches!(self.state, State::Fired | State::Releasing(_))
    }

    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    fn count(&self, observed: u32) -> (State, MeetStatus) {
        if observed >= self.meet {
            (State::Fired, MeetStatus::Triggered)
        } else {
            (State::Counting(observed), MeetStatus::Pending { observed })
        }
    }

    fn miss(&self, missed: u32) -> (State, MeetStatus) {
        if missed >= self.prev_meet {
            (State::Idle, MeetStatus::Resolved)
        } else {
            (State::Releasing(missed), MeetStatus::Releasing { missed })
        }
    }
}

fn threshold(count: Option<i32>) -> u32 {
    count.and_then(|n| u32::try_from(n).ok()).unwrap_or(1).max(1)
}
