//! Lazily parsed descriptors owned by configuration entries.

use crate::{TriggerRule, parse_optional};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::trace;

/// A descriptor string together with its rule, parsed on first use.
///
/// Every call to [`rule`](Self::rule) returns the same instance. When several
/// threads race on the first call, only one parsed rule is ever stored and
/// every caller observes it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Option<String>")]
pub struct TriggerEntry {
    descriptor: Option<String>,
    rule: OnceCell<TriggerRule>,
}

impl TriggerEntry {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self { descriptor: Some(descriptor.into()), rule: OnceCell::new() }
    }

    /// An entry with no descriptor; its rule is the empty rule.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn descriptor(&self) -> Option<&str> {
        self.descriptor.as_deref()
    }

    /// The parsed rule, parsing it on the first call.
    pub fn rule(&self) -> &TriggerRule {
        self.rule.get_or_init(|| {
            trace!(target: "trigline::entry", descriptor = ?self.descriptor, "parsing trigger descriptor");
            parse_optional(self.descriptor.as_deref())
        })
    }

    /// Return true once [`rule`](Self::rule) has materialised the rule.
    pub fn is_parsed(&self) -> bool {
        self.rule.get().is_some()
    }
}

impl From<Option<String>> for TriggerEntry {
    fn from(descriptor: Option<String>) -> Self {
        Self { descriptor, rule: OnceCell::new() }
    }
}

impl From<&str> for TriggerEntry {
    fn from(descriptor: &str) -> Self {
        Self::new(descriptor)
    }
}

impl PartialEq for TriggerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl Eq for TriggerEntry {}
