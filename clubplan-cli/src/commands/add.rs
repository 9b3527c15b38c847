use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use clubplan_core::store::{MatchStore, NewMatch};
use clubplan_core::{MatchDate, MatchDetails};

use super::store_spinner;

/// Create a remote match by hand (no ICS involved).
pub async fn run(
    store: &dyn MatchStore,
    team: String,
    opponent: String,
    date: String,
    time: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{date}', expected YYYY-MM-DD"))?;

    let new_match = NewMatch {
        details: MatchDetails {
            team,
            opponent,
            date: MatchDate::Day(day),
            time,
            location,
            description: None,
        },
        result: None,
        canceled: false,
    };

    let spinner = store_spinner("Creating match");
    let result = store.create(new_match).await;
    spinner.finish_and_clear();
    let created = result?;

    println!(
        "{} {} on {} (id {})",
        "Created".green(),
        created.details.label(),
        created.details.date,
        created.id
    );
    Ok(())
}
