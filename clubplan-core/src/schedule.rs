//! Unified schedule views.
//!
//! Remote and imported matches are merged into one sorted collection,
//! grouped per team and reduced to the "current matchday": the nearest
//! match date at or after a reference day, falling back to the most recent
//! past one. The reference day is always an explicit parameter, never an
//! ambient clock read, so the derivation stays deterministic.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::matches::{ImportedMatch, Match, RemoteMatch};

/// The merged, sorted, grouped view over both match provenances.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// All matches, ascending by date; unknown dates last in input order
    pub all: Vec<Match>,
    /// Matches per trimmed team label (blank teams under `UNKNOWN_TEAM`)
    pub by_team: BTreeMap<String, Vec<Match>>,
    /// Date of the matchday nearest to the reference day, if any date is known
    pub current_matchday: Option<NaiveDate>,
}

impl Schedule {
    pub fn build(
        remote: Vec<RemoteMatch>,
        imported: Vec<ImportedMatch>,
        today: NaiveDate,
    ) -> Schedule {
        let mut all: Vec<Match> = remote
            .into_iter()
            .map(Match::Supabase)
            .chain(imported.into_iter().map(Match::Ics))
            .collect();

        // Stable sort: unknown dates keep their relative input order at the end
        all.sort_by_key(|m| match m.date().day() {
            Some(d) => (false, d),
            None => (true, NaiveDate::MAX),
        });

        let mut by_team: BTreeMap<String, Vec<Match>> = BTreeMap::new();
        for m in &all {
            by_team
                .entry(m.team_label().to_string())
                .or_default()
                .push(m.clone());
        }

        let current_matchday = current_matchday(&all, today);

        Schedule {
            all,
            by_team,
            current_matchday,
        }
    }

    /// Every match dated exactly on the current matchday.
    pub fn overview(&self) -> Vec<&Match> {
        match self.current_matchday {
            Some(day) => self
                .all
                .iter()
                .filter(|m| m.date().day() == Some(day))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Case-insensitive substring search over team and opponent.
    pub fn filter(&self, term: &str) -> Vec<&Match> {
        let term = term.to_lowercase();
        self.all
            .iter()
            .filter(|m| {
                let d = m.details();
                d.team.to_lowercase().contains(&term)
                    || d.opponent.to_lowercase().contains(&term)
            })
            .collect()
    }
}

/// Earliest date at or after `today`; otherwise the latest date overall.
/// `None` when no match has a resolvable date.
fn current_matchday(all: &[Match], today: NaiveDate) -> Option<NaiveDate> {
    let days = all.iter().filter_map(|m| m.date().day());
    days.clone()
        .filter(|d| *d >= today)
        .min()
        .or_else(|| days.max())
}
