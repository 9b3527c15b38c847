//! Import merging and promotion.
//!
//! `merge_imported` folds freshly parsed calendar events into the imported
//! cache, deduplicating by the calendar UID (or a synthesized identifier for
//! UID-less events). `promote` turns an imported match into an authoritative
//! remote one; the cache entry survives any failed remote write.

use std::collections::HashSet;
use std::path::Path;

use crate::cache::{CacheStore, ImportCache};
use crate::error::{ClubPlanError, ClubPlanResult};
use crate::event::{CalendarEvent, EventStatus};
use crate::matches::{ImportedMatch, MatchDate, MatchDetails, RemoteMatch, Score};
use crate::store::{MatchStore, NewMatch};

/// Context for one import run.
#[derive(Debug, Clone)]
pub struct ImportMeta {
    /// Name of the file the events came from, used for synthesized ids
    pub file_name: String,
}

/// Result of merging one parsed file into the cache.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Matches that were not in the cache before this run
    pub added: Vec<ImportedMatch>,
    /// The full updated cache, ready to be persisted
    pub cache: ImportCache,
    pub duplicates_skipped: usize,
    events_parsed: usize,
}

/// Caller-distinguishable classification of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeReport {
    /// The file contained no parseable events
    NoEvents,
    /// Every event was already in the cache
    AllDuplicates { skipped: usize },
    Imported { added: usize, skipped: usize },
}

impl MergeOutcome {
    pub fn report(&self) -> MergeReport {
        if self.events_parsed == 0 {
            MergeReport::NoEvents
        } else if self.added.is_empty() {
            MergeReport::AllDuplicates {
                skipped: self.duplicates_skipped,
            }
        } else {
            MergeReport::Imported {
                added: self.added.len(),
                skipped: self.duplicates_skipped,
            }
        }
    }
}

/// Merge parsed events into the current cache, in parser order.
///
/// An event is dropped as a duplicate when its non-empty UID is already
/// known, or when its identifier (UID-derived or synthesized) is. Dropped
/// events are counted, not errors: re-importing the same file is a no-op.
pub fn merge_imported(
    events: &[CalendarEvent],
    meta: &ImportMeta,
    current: &ImportCache,
) -> MergeOutcome {
    let mut known_uids: HashSet<String> = current
        .matches
        .iter()
        .filter_map(|m| m.ics_uid.clone())
        .filter(|uid| !uid.is_empty())
        .collect();
    let mut known_ids: HashSet<String> =
        current.matches.iter().map(|m| m.id.clone()).collect();

    let mut added = Vec::new();
    let mut duplicates_skipped = 0;

    for (pos, event) in events.iter().enumerate() {
        let candidate = candidate_match(event, meta, pos);

        let uid = candidate.ics_uid.as_deref().filter(|uid| !uid.is_empty());
        let duplicate = uid.is_some_and(|uid| known_uids.contains(uid))
            || known_ids.contains(&candidate.id);
        if duplicate {
            duplicates_skipped += 1;
            continue;
        }

        if let Some(uid) = uid {
            known_uids.insert(uid.to_string());
        }
        known_ids.insert(candidate.id.clone());
        added.push(candidate);
    }

    let mut cache = current.clone();
    cache.matches.extend(added.iter().cloned());

    MergeOutcome {
        added,
        cache,
        duplicates_skipped,
        events_parsed: events.len(),
    }
}

/// Build the imported match a parsed event would become.
///
/// Identity: `ics-<uid>` when the event carries a UID. Without one the id is
/// synthesized from the normalized file name, the event's position and its
/// date, so that re-importing the same file stays idempotent while unrelated
/// files cannot collide with earlier imports.
fn candidate_match(event: &CalendarEvent, meta: &ImportMeta, pos: usize) -> ImportedMatch {
    let id = match event.ics_uid.as_deref().filter(|uid| !uid.is_empty()) {
        Some(uid) => format!("ics-{uid}"),
        None => {
            let stem = Path::new(&meta.file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(&meta.file_name);
            format!(
                "ics-{}-{pos}-{}",
                slug::slugify(stem),
                event.date.format("%Y%m%d")
            )
        }
    };

    ImportedMatch {
        id,
        ics_uid: event.ics_uid.clone(),
        details: MatchDetails {
            team: event.team.clone().unwrap_or_default(),
            opponent: event.opponent.clone(),
            date: MatchDate::Day(event.date),
            time: event.time.clone(),
            location: event.location.clone(),
            description: event.description.clone(),
        },
        canceled: event.status == EventStatus::Canceled,
    }
}

/// Edits applied while promoting an imported match (or updating a remote one).
#[derive(Debug, Clone, Default)]
pub struct MatchEdits {
    pub result: Option<Score>,
    pub team: Option<String>,
    pub opponent: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl MatchEdits {
    pub fn with_result(score: Score) -> Self {
        MatchEdits {
            result: Some(score),
            ..Default::default()
        }
    }

    pub fn apply(&self, details: &MatchDetails) -> MatchDetails {
        MatchDetails {
            team: self.team.clone().unwrap_or_else(|| details.team.clone()),
            opponent: self
                .opponent
                .clone()
                .unwrap_or_else(|| details.opponent.clone()),
            date: details.date.clone(),
            time: self.time.clone().or_else(|| details.time.clone()),
            location: self.location.clone().or_else(|| details.location.clone()),
            description: self
                .description
                .clone()
                .or_else(|| details.description.clone()),
        }
    }
}

/// Promote an imported match into the remote store.
///
/// The remote insert happens first; the cache entry is only removed once it
/// succeeds, so a failed write never loses the imported match.
pub async fn promote(
    store: &dyn MatchStore,
    cache_store: &CacheStore,
    imported: &ImportedMatch,
    edits: &MatchEdits,
) -> ClubPlanResult<RemoteMatch> {
    let new_match = NewMatch {
        details: edits.apply(&imported.details),
        result: edits.result,
        canceled: imported.canceled,
    };

    let created = store.create(new_match).await.map_err(|e| {
        ClubPlanError::Store(format!(
            "could not promote '{}': {e}",
            imported.details.label()
        ))
    })?;

    let mut cache = cache_store.load()?;
    cache.remove(imported);
    cache_store.save(&cache)?;

    Ok(created)
}

/// Remove an imported match from the cache. Remote matches are untouched.
pub fn remove_imported(
    cache_store: &CacheStore,
    imported: &ImportedMatch,
) -> ClubPlanResult<bool> {
    let mut cache = cache_store.load()?;
    let removed = cache.remove(imported);
    if removed {
        cache_store.save(&cache)?;
    }
    Ok(removed)
}
