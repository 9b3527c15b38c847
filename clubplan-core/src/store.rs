//! Remote match store seam.
//!
//! The authoritative match table lives in a hosted backend; this trait is
//! the narrow CRUD surface the reconciliation layer needs from it. The CLI
//! provides a REST-backed implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClubPlanResult;
use crate::matches::{MatchDetails, RemoteMatch, Score};

/// A match about to be created remotely. The store assigns the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    pub details: MatchDetails,
    pub result: Option<Score>,
    #[serde(default)]
    pub canceled: bool,
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn list(&self) -> ClubPlanResult<Vec<RemoteMatch>>;
    async fn create(&self, new_match: NewMatch) -> ClubPlanResult<RemoteMatch>;
    async fn update(&self, updated: &RemoteMatch) -> ClubPlanResult<RemoteMatch>;
    async fn delete(&self, id: &str) -> ClubPlanResult<()>;
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory store used by the reconciliation tests.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    use async_trait::async_trait;

    use super::{MatchStore, NewMatch};
    use crate::error::{ClubPlanError, ClubPlanResult};
    use crate::matches::RemoteMatch;

    #[derive(Default)]
    pub struct MemoryStore {
        matches: Mutex<Vec<RemoteMatch>>,
        next_id: AtomicU64,
        fail_writes: AtomicBool,
    }

    impl MemoryStore {
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub fn snapshot(&self) -> Vec<RemoteMatch> {
            self.matches.lock().unwrap().clone()
        }

        fn check_writable(&self) -> ClubPlanResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                Err(ClubPlanError::Store("write rejected".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl MatchStore for MemoryStore {
        async fn list(&self) -> ClubPlanResult<Vec<RemoteMatch>> {
            Ok(self.snapshot())
        }

        async fn create(&self, new_match: NewMatch) -> ClubPlanResult<RemoteMatch> {
            self.check_writable()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let created = RemoteMatch {
                id: format!("m-{id}"),
                details: new_match.details,
                result: new_match.result,
                canceled: new_match.canceled,
                created_at: None,
            };
            self.matches.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, updated: &RemoteMatch) -> ClubPlanResult<RemoteMatch> {
            self.check_writable()?;
            let mut matches = self.matches.lock().unwrap();
            let slot = matches
                .iter_mut()
                .find(|m| m.id == updated.id)
                .ok_or_else(|| ClubPlanError::MatchNotFound(updated.id.clone()))?;
            *slot = updated.clone();
            Ok(updated.clone())
        }

        async fn delete(&self, id: &str) -> ClubPlanResult<()> {
            self.check_writable()?;
            let mut matches = self.matches.lock().unwrap();
            let before = matches.len();
            matches.retain(|m| m.id != id);
            if matches.len() == before {
                return Err(ClubPlanError::MatchNotFound(id.to_string()));
            }
            Ok(())
        }
    }
}
