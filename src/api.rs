use crate::engine::{ParseDetails, Parser};
use crate::TriggerRule;

/// Result from [`parse_verbose`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    /// The parsed descriptor text.
    pub text: String,
    /// Same rule [`parse`] returns for `text`.
    pub rule: TriggerRule,
    pub details: ParseDetails,
}

/// Parse a trigger descriptor.
///
/// Never fails: fields that cannot be understood are left unset.
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// let rule = trigline::parse("Backup:Delay=30;MeetCount=3");
/// assert_eq!(rule.event_name(), "Backup");
/// assert_eq!(rule.delay(), Some(Duration::from_secs(30)));
/// assert_eq!(rule.meet_count(), Some(3));
/// assert_eq!(trigline::parse("Backup:Delay=soon").delay(), None);
/// ```
pub fn parse(descriptor: &str) -> TriggerRule {
    parse_optional(Some(descriptor))
}

/// Parse a descriptor that may be absent. `None` yields the empty rule.
pub fn parse_optional(descriptor: Option<&str>) -> TriggerRule {
    Parser::new().run(descriptor).0
}

/// Parse `descriptor` and also report which fields were recognised and which
/// tokens were dropped.
///
/// This is meant for operators debugging a descriptor; the plain [`parse`]
/// path does not allocate these details.
pub fn parse_verbose(descriptor: &str) -> ParseResultVerbose {
    let (rule, details) = Parser::with_details().run(Some(descriptor));
    ParseResultVerbose { text: descriptor.to_string(), rule, details: details.unwrap_or_default() }
}
