use anyhow::Result;
use owo_colors::OwoColorize;

use clubplan_core::cache::CacheStore;
use clubplan_core::reconcile::remove_imported;
use clubplan_core::store::MatchStore;

use super::store_spinner;

/// Remove a match: imported ones are dropped from the local cache, remote
/// ones are deleted from the store.
pub async fn run(store: &dyn MatchStore, cache_store: &CacheStore, id: &str) -> Result<()> {
    let cache = cache_store.load()?;

    if let Some(imported) = cache.find(id).cloned() {
        remove_imported(cache_store, &imported)?;
        println!(
            "{} imported match {}",
            "Removed".green(),
            imported.details.label()
        );
        return Ok(());
    }

    let spinner = store_spinner("Deleting match");
    let result = store.delete(id).await;
    spinner.finish_and_clear();
    result?;

    println!("{} match {id}", "Deleted".green());
    Ok(())
}
