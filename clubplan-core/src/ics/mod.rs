//! ICS schedule file parsing.
//!
//! Reads league schedule exports (RFC 5545-ish, user supplied and not
//! guaranteed to be compliant) into match events.

mod parse;

pub use parse::{ParseOptions, parse_events};
