//! Hosted match-table access.
//!
//! The club's authoritative `matches` table lives behind a PostgREST-style
//! REST endpoint. Rows use the flat nullable `home_score`/`away_score` shape
//! of the hosted table; conversion to the typed model happens here at the
//! boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clubplan_core::store::{MatchStore, NewMatch};
use clubplan_core::{ClubPlanError, ClubPlanResult, MatchStatus, RemoteMatch, Score};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

pub struct RestMatchStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestMatchStore {
    pub fn new(store_url: &str, store_key: &str) -> ClubPlanResult<Self> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(store_key)
            .map_err(|e| ClubPlanError::Config(format!("invalid store key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {store_key}"))
            .map_err(|e| ClubPlanError::Config(format!("invalid store key: {e}")))?;
        headers.insert(HeaderName::from_static("apikey"), api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClubPlanError::Store(e.to_string()))?;

        Ok(RestMatchStore {
            client,
            base_url: format!("{}/rest/v1/matches", store_url.trim_end_matches('/')),
        })
    }
}

/// One row of the hosted `matches` table.
#[derive(Debug, Serialize, Deserialize)]
struct MatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    team: String,
    opponent: String,
    date: String,
    time: Option<String>,
    location: Option<String>,
    description: Option<String>,
    home_score: Option<u32>,
    away_score: Option<u32>,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl MatchRow {
    fn from_new(new_match: &NewMatch) -> MatchRow {
        let status = if new_match.result.is_some() {
            MatchStatus::Completed
        } else if new_match.canceled {
            MatchStatus::Canceled
        } else {
            MatchStatus::Scheduled
        };
        MatchRow {
            id: None,
            team: new_match.details.team.clone(),
            opponent: new_match.details.opponent.clone(),
            date: new_match.details.date.to_string(),
            time: new_match.details.time.clone(),
            location: new_match.details.location.clone(),
            description: new_match.details.description.clone(),
            home_score: new_match.result.map(|s| s.home),
            away_score: new_match.result.map(|s| s.away),
            status: status.to_string(),
            created_at: None,
        }
    }

    fn from_remote(m: &RemoteMatch) -> MatchRow {
        MatchRow {
            id: Some(m.id.clone()),
            team: m.details.team.clone(),
            opponent: m.details.opponent.clone(),
            date: m.details.date.to_string(),
            time: m.details.time.clone(),
            location: m.details.location.clone(),
            description: m.details.description.clone(),
            home_score: m.result.map(|s| s.home),
            away_score: m.result.map(|s| s.away),
            status: m.status().to_string(),
            created_at: m.created_at,
        }
    }

    fn into_remote(self) -> ClubPlanResult<RemoteMatch> {
        let id = self
            .id
            .ok_or_else(|| ClubPlanError::Store("row without id".to_string()))?;

        // A half-entered score pair counts as unplayed
        let result = match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some(Score { home, away }),
            _ => None,
        };

        Ok(RemoteMatch {
            id,
            details: clubplan_core::MatchDetails {
                team: self.team,
                opponent: self.opponent,
                date: self.date.into(),
                time: self.time,
                location: self.location,
                description: self.description,
            },
            result,
            canceled: self.status == "canceled",
            created_at: self.created_at,
        })
    }
}

async fn ok_or_store(response: reqwest::Response) -> ClubPlanResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ClubPlanError::Store(format!("{status}: {body}")))
    }
}

fn store_err(e: reqwest::Error) -> ClubPlanError {
    ClubPlanError::Store(e.to_string())
}

#[async_trait]
impl MatchStore for RestMatchStore {
    async fn list(&self) -> ClubPlanResult<Vec<RemoteMatch>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("select", "*"), ("order", "date.asc")])
            .send()
            .await
            .map_err(store_err)?;
        let rows: Vec<MatchRow> = ok_or_store(response)
            .await?
            .json()
            .await
            .map_err(store_err)?;
        rows.into_iter().map(MatchRow::into_remote).collect()
    }

    async fn create(&self, new_match: NewMatch) -> ClubPlanResult<RemoteMatch> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Prefer", "return=representation")
            .json(&[MatchRow::from_new(&new_match)])
            .send()
            .await
            .map_err(store_err)?;
        let mut rows: Vec<MatchRow> = ok_or_store(response)
            .await?
            .json()
            .await
            .map_err(store_err)?;
        rows.pop()
            .ok_or_else(|| ClubPlanError::Store("create returned no row".to_string()))?
            .into_remote()
    }

    async fn update(&self, updated: &RemoteMatch) -> ClubPlanResult<RemoteMatch> {
        let mut row = MatchRow::from_remote(updated);
        // The id selects the row via the query string, not the body
        row.id = None;
        let response = self
            .client
            .patch(&self.base_url)
            .query(&[("id", format!("eq.{}", updated.id))])
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(store_err)?;
        let mut rows: Vec<MatchRow> = ok_or_store(response)
            .await?
            .json()
            .await
            .map_err(store_err)?;
        rows.pop()
            .ok_or_else(|| ClubPlanError::MatchNotFound(updated.id.clone()))?
            .into_remote()
    }

    async fn delete(&self, id: &str) -> ClubPlanResult<()> {
        let response = self
            .client
            .delete(&self.base_url)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(store_err)?;
        ok_or_store(response).await?;
        Ok(())
    }
}
