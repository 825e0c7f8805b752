//! Descriptor parsing and matching engine.
//!
//! The engine turns one descriptor string into a [`TriggerRule`] and answers
//! read-only questions about it. It is split into focused submodules under
//! `src/engine/` while keeping public paths flat (`crate::engine::ValidWindow`).
//!
//! ## How the parts work together
//!
//! ```text
//! descriptor ── split ':' (limit 2) ──┬── event name
//!                                     │
//!                                     └── split ';' (remove empty)
//!                                           └── split '=' (limit 2)
//!                                                 │  Parser::apply  (parser.rs)
//!                                                 v
//!                                           TriggerRule
//!                                                 │
//!            ┌────────────────────────────────────┼───────────────────┐
//!            v                                    v                   v
//!   ValidWindow::contains (window.rs)   has_param_value_or_unset   get_param_value
//!                                       (matcher.rs)
//! ```
//!
//! Parsing never fails. Anything the parser cannot understand leaves the
//! matching field unset; the only trace of it is a `tracing` debug event and,
//! when requested, an entry in [`ParseDetails`] (report.rs).
//!
//! ## Responsibilities by module
//!
//! - `parser.rs`: walks the descriptor and fills in a `TriggerRule`.
//! - `window.rs`: daily window arithmetic, including windows that cross
//!   midnight.
//! - `matcher.rs`: query surface on `TriggerRule` (window, parameters,
//!   exclusions).
//! - `report.rs`: optional diagnostics collected while parsing.
//!
//! [`TriggerRule`]: crate::TriggerRule

#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/report.rs"]
mod report;
#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;
#[path = "engine/window.rs"]
mod window;

pub(crate) use parser::Parser;
pub use report::{FieldSet, ParseDetails, RejectReason, Rejection};
pub use window::ValidWindow;
