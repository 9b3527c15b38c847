//! Provenance-tagged match types.
//!
//! A match is either *remote* (authoritative, server-assigned id, may carry a
//! result) or *imported* (cached from an ICS file, no result until a human
//! promotes it into the remote store). Promotion is a type-level transition:
//! a new `RemoteMatch` is constructed and the `ImportedMatch` is discarded,
//! there is no mutable source flag.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Group label used for matches whose team field is empty or whitespace.
pub const UNKNOWN_TEAM: &str = "Unknown team";

/// A match date as stored: either a real calendar day or an unparsable
/// raw string coming from the remote table. Unknown dates sort after all
/// real dates and never participate in matchday derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchDate {
    Day(NaiveDate),
    Unknown(String),
}

impl MatchDate {
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            MatchDate::Day(d) => Some(*d),
            MatchDate::Unknown(_) => None,
        }
    }
}

impl From<String> for MatchDate {
    fn from(raw: String) -> Self {
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(d) => MatchDate::Day(d),
            Err(_) => MatchDate::Unknown(raw),
        }
    }
}

impl From<MatchDate> for String {
    fn from(date: MatchDate) -> Self {
        date.to_string()
    }
}

impl From<NaiveDate> for MatchDate {
    fn from(d: NaiveDate) -> Self {
        MatchDate::Day(d)
    }
}

impl std::fmt::Display for MatchDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchDate::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            MatchDate::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// A recorded result. Both scores always exist together; an unplayed match
/// is `Option::<Score>::None`, never a half-filled pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

/// Fields shared by both match provenances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub team: String,
    pub opponent: String,
    pub date: MatchDate,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl MatchDetails {
    /// Trimmed team name, collapsing blank values into the shared
    /// unknown-team label so grouping never creates a ghost group.
    pub fn team_label(&self) -> &str {
        let trimmed = self.team.trim();
        if trimmed.is_empty() { UNKNOWN_TEAM } else { trimmed }
    }

    /// Short human-readable label, e.g. for error messages.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.team_label(), self.opponent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Completed,
    Canceled,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Completed => "completed",
            MatchStatus::Canceled => "canceled",
        };
        write!(f, "{s}")
    }
}

/// Which system a match record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Supabase,
    Ics,
}

/// An authoritative match record held in the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteMatch {
    /// Server-assigned identifier
    pub id: String,
    #[serde(flatten)]
    pub details: MatchDetails,
    pub result: Option<Score>,
    #[serde(default)]
    pub canceled: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl RemoteMatch {
    /// Status is computed, never stored: completed exactly when a result
    /// exists, canceled only when explicitly marked.
    pub fn status(&self) -> MatchStatus {
        if self.result.is_some() {
            MatchStatus::Completed
        } else if self.canceled {
            MatchStatus::Canceled
        } else {
            MatchStatus::Scheduled
        }
    }
}

/// A match cached from an ICS import, waiting to be promoted or pruned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedMatch {
    pub id: String,
    /// UID of the originating calendar entry, when it carried one
    pub ics_uid: Option<String>,
    #[serde(flatten)]
    pub details: MatchDetails,
    #[serde(default)]
    pub canceled: bool,
}

impl ImportedMatch {
    pub fn status(&self) -> MatchStatus {
        if self.canceled {
            MatchStatus::Canceled
        } else {
            MatchStatus::Scheduled
        }
    }
}

/// A match of either provenance, as presented in unified views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Match {
    Supabase(RemoteMatch),
    Ics(ImportedMatch),
}

impl Match {
    pub fn id(&self) -> &str {
        match self {
            Match::Supabase(m) => &m.id,
            Match::Ics(m) => &m.id,
        }
    }

    pub fn details(&self) -> &MatchDetails {
        match self {
            Match::Supabase(m) => &m.details,
            Match::Ics(m) => &m.details,
        }
    }

    pub fn team_label(&self) -> &str {
        self.details().team_label()
    }

    pub fn date(&self) -> &MatchDate {
        &self.details().date
    }

    pub fn status(&self) -> MatchStatus {
        match self {
            Match::Supabase(m) => m.status(),
            Match::Ics(m) => m.status(),
        }
    }

    pub fn result(&self) -> Option<Score> {
        match self {
            Match::Supabase(m) => m.result,
            Match::Ics(_) => None,
        }
    }

    pub fn source(&self) -> MatchSource {
        match self {
            Match::Supabase(_) => MatchSource::Supabase,
            Match::Ics(_) => MatchSource::Ics,
        }
    }
}
