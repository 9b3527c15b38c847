use anyhow::{Result, anyhow};
use owo_colors::OwoColorize;

use clubplan_core::cache::CacheStore;
use clubplan_core::reconcile::{MatchEdits, promote};
use clubplan_core::store::MatchStore;

use super::store_spinner;

/// Edit match details. Editing an imported match promotes it: the edited
/// record is created remotely and the cache entry is dropped.
pub async fn run(
    store: &dyn MatchStore,
    cache_store: &CacheStore,
    id: &str,
    edits: MatchEdits,
) -> Result<()> {
    let cache = cache_store.load()?;

    if let Some(imported) = cache.find(id).cloned() {
        let spinner = store_spinner("Saving match");
        let result = promote(store, cache_store, &imported, &edits).await;
        spinner.finish_and_clear();
        let created = result?;

        println!(
            "{} {} (now tracked as {})",
            "Saved".green(),
            created.details.label(),
            created.id
        );
        return Ok(());
    }

    let spinner = store_spinner("Saving match");
    let result = update_remote(store, id, &edits).await;
    spinner.finish_and_clear();
    let updated = result?;

    println!("{} {}", "Saved".green(), updated.details.label());
    Ok(())
}

async fn update_remote(
    store: &dyn MatchStore,
    id: &str,
    edits: &MatchEdits,
) -> Result<clubplan_core::RemoteMatch> {
    let matches = store.list().await?;
    let mut target = matches
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| anyhow!("No match with id '{id}'"))?;
    target.details = edits.apply(&target.details);
    if let Some(score) = edits.result {
        target.result = Some(score);
    }
    Ok(store.update(&target).await?)
}
