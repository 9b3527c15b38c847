use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use clubplan_core::cache::CacheStore;
use clubplan_core::schedule::Schedule;
use clubplan_core::store::MatchStore;

use super::store_spinner;
use crate::render::Render;

pub async fn run(
    store: &dyn MatchStore,
    cache_store: &CacheStore,
    team: Option<String>,
    search: Option<String>,
    today: Option<String>,
) -> Result<()> {
    let today = match today.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))?,
        None => chrono::Local::now().date_naive(),
    };

    let spinner = store_spinner("Loading matches");
    let remote = store.list().await;
    spinner.finish_and_clear();
    let remote = remote?;

    let imported = cache_store.load()?.matches;
    let schedule = Schedule::build(remote, imported, today);

    if let Some(term) = search {
        let hits = schedule.filter(&term);
        if hits.is_empty() {
            println!("No matches for '{term}'");
            return Ok(());
        }
        for m in hits {
            println!("{}", m.render());
        }
        return Ok(());
    }

    if schedule.all.is_empty() {
        println!("No matches yet. Import an ICS schedule or add one manually.");
        return Ok(());
    }

    if let Some(day) = schedule.current_matchday {
        println!("{} {}", "Matchday".bold(), day.format("%Y-%m-%d").to_string().bold());
        for m in schedule.overview() {
            println!("   {}", m.render());
        }
        println!();
    }

    let teams: Vec<_> = schedule
        .by_team
        .iter()
        .filter(|(label, _)| match team.as_deref() {
            Some(wanted) => label.as_str() == wanted,
            None => true,
        })
        .collect();

    if teams.is_empty() {
        if let Some(wanted) = team {
            println!("No matches for team '{wanted}'");
        }
        return Ok(());
    }

    for (i, (label, matches)) in teams.iter().enumerate() {
        println!("{}", label.bold());
        for m in *matches {
            println!("   {}", m.render());
        }
        if i < teams.len() - 1 {
            println!();
        }
    }

    Ok(())
}
