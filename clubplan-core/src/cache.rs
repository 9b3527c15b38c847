//! Imported-match cache.
//!
//! Matches imported from ICS files live in a single JSON document until a
//! human promotes them into the remote store or prunes them. The cache is
//! always read and written as a whole; callers must serialize concurrent
//! imports themselves (the merge is a read-modify-write of the full
//! collection).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{ClubPlanError, ClubPlanResult};
use crate::matches::ImportedMatch;

/// The persisted collection of imported matches.
///
/// Invariant: no two entries share the same non-empty `ics_uid`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ImportCache {
    pub matches: Vec<ImportedMatch>,
}

impl ImportCache {
    /// Remove one entry, matching by UID when the target has one and by
    /// identifier otherwise. Returns whether anything was removed.
    pub fn remove(&mut self, target: &ImportedMatch) -> bool {
        let before = self.matches.len();
        match target.ics_uid.as_deref().filter(|uid| !uid.is_empty()) {
            Some(uid) => self.matches.retain(|m| m.ics_uid.as_deref() != Some(uid)),
            None => self.matches.retain(|m| m.id != target.id),
        }
        self.matches.len() < before
    }

    /// Find an entry by its identifier or its UID.
    pub fn find(&self, key: &str) -> Option<&ImportedMatch> {
        self.matches
            .iter()
            .find(|m| m.id == key || m.ics_uid.as_deref() == Some(key))
    }
}

/// Owned handle to the cache file.
///
/// All mutation goes through `save`, which bumps a revision channel so that
/// other components can subscribe to changes instead of re-reading ambient
/// state.
pub struct CacheStore {
    path: PathBuf,
    revision: watch::Sender<u64>,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (revision, _) = watch::channel(0);
        CacheStore {
            path: path.into(),
            revision,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache. A missing file is the empty cache, not an error.
    pub fn load(&self) -> ClubPlanResult<ImportCache> {
        if !self.path.exists() {
            return Ok(ImportCache::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            ClubPlanError::Cache(format!(
                "failed to parse import cache at {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Save the cache atomically (temp file + rename) and notify subscribers.
    pub fn save(&self, cache: &ImportCache) -> ClubPlanResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(cache)
            .map_err(|e| ClubPlanError::Serialization(e.to_string()))?;

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, contents)?;
        std::fs::rename(&temp, &self.path)?;

        self.revision.send_modify(|rev| *rev += 1);
        Ok(())
    }

    /// Subscribe to cache changes. The channel carries a revision counter;
    /// subscribers re-load on change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::{MatchDate, MatchDetails};

    fn imported(id: &str, uid: Option<&str>) -> ImportedMatch {
        ImportedMatch {
            id: id.to_string(),
            ics_uid: uid.map(String::from),
            details: MatchDetails {
                team: "Herren I".to_string(),
                opponent: "TTC Musterstadt".to_string(),
                date: MatchDate::from("2024-11-30".to_string()),
                time: Some("14:00".to_string()),
                location: None,
                description: None,
            },
            canceled: false,
        }
    }

    #[test]
    fn test_missing_file_loads_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("imported_matches.json"));
        assert!(store.load().unwrap().matches.is_empty());
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("imported_matches.json"));

        let cache = ImportCache {
            matches: vec![imported("ics-evt-42", Some("evt-42"))],
        };
        store.save(&cache).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.matches, cache.matches);

        // Atomic save must not leave its temp file behind
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec!["imported_matches.json"]);
    }

    #[test]
    fn test_remove_matches_by_uid_then_id() {
        let mut cache = ImportCache {
            matches: vec![
                imported("ics-evt-42", Some("evt-42")),
                imported("ics-plan-0-20241130", None),
            ],
        };

        assert!(cache.remove(&imported("other-id", Some("evt-42"))));
        assert!(cache.remove(&imported("ics-plan-0-20241130", None)));
        assert!(!cache.remove(&imported("ics-plan-0-20241130", None)));
        assert!(cache.matches.is_empty());
    }

    #[test]
    fn test_save_notifies_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("imported_matches.json"));

        let rx = store.subscribe();
        assert_eq!(*rx.borrow(), 0);

        store.save(&ImportCache::default()).unwrap();
        assert_eq!(*rx.borrow(), 1);
    }
}
