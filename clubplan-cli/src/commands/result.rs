use anyhow::{Result, anyhow};
use owo_colors::OwoColorize;

use clubplan_core::Score;
use clubplan_core::cache::CacheStore;
use clubplan_core::reconcile::{MatchEdits, promote};
use clubplan_core::store::MatchStore;

use super::store_spinner;

/// Record a result. An imported match is promoted into the remote store in
/// the same step; a remote match is updated in place.
pub async fn run(
    store: &dyn MatchStore,
    cache_store: &CacheStore,
    id: &str,
    home: u32,
    away: u32,
) -> Result<()> {
    let score = Score { home, away };
    let cache = cache_store.load()?;

    if let Some(imported) = cache.find(id).cloned() {
        let spinner = store_spinner("Saving result");
        let result = promote(store, cache_store, &imported, &MatchEdits::with_result(score)).await;
        spinner.finish_and_clear();
        let created = result?;

        println!(
            "{} {} {} (now tracked as {})",
            "Saved".green(),
            created.details.label(),
            score.to_string().bold(),
            created.id
        );
        return Ok(());
    }

    let spinner = store_spinner("Saving result");
    let result = update_remote(store, id, score).await;
    spinner.finish_and_clear();
    let updated = result?;

    println!(
        "{} {} {}",
        "Saved".green(),
        updated.details.label(),
        score.to_string().bold()
    );
    Ok(())
}

async fn update_remote(
    store: &dyn MatchStore,
    id: &str,
    score: Score,
) -> Result<clubplan_core::RemoteMatch> {
    let matches = store.list().await?;
    let mut target = matches
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| anyhow!("No match with id '{id}'"))?;
    target.result = Some(score);
    Ok(store.update(&target).await?)
}
