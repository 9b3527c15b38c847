//! Core types and logic for the clubplan ecosystem.
//!
//! This crate provides everything the CLI builds on:
//! - the `Match` data model (remote and imported provenances)
//! - the ICS schedule parser (`ics` module)
//! - the imported-match cache (`cache` module)
//! - reconciliation: import merging, promotion, schedule views

pub mod cache;
pub mod error;
pub mod event;
pub mod ics;
pub mod matches;
pub mod reconcile;
pub mod schedule;
pub mod store;

pub use error::{ClubPlanError, ClubPlanResult};
pub use matches::*;
