use anyhow::{Result, anyhow};
use owo_colors::OwoColorize;

use clubplan_core::store::MatchStore;

use super::store_spinner;

/// Mark a remote match as canceled. Imported matches cannot be canceled in
/// place; record the state by promoting (`edit`) or drop them (`remove`).
pub async fn run(store: &dyn MatchStore, id: &str) -> Result<()> {
    let spinner = store_spinner("Updating match");
    let result = cancel_remote(store, id).await;
    spinner.finish_and_clear();
    let canceled = result?;

    println!("{} {}", "Canceled".yellow(), canceled.details.label());
    Ok(())
}

async fn cancel_remote(store: &dyn MatchStore, id: &str) -> Result<clubplan_core::RemoteMatch> {
    let matches = store.list().await?;
    let mut target = matches
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| anyhow!("No match with id '{id}'"))?;

    // A recorded result always wins over the canceled flag, so canceling a
    // completed match would have to wipe the score. Refuse instead of
    // silently destroying data.
    if let Some(score) = target.result {
        return Err(anyhow!(
            "Match '{}' has a recorded result ({score}); remove the match or edit the result instead of canceling",
            target.details.label()
        ));
    }

    target.canceled = true;
    Ok(store.update(&target).await?)
}
