//! Terminal rendering for clubplan types.
//!
//! Extension traits adding colored output to core types using owo_colors.

use clubplan_core::reconcile::MergeReport;
use clubplan_core::{Match, MatchSource, MatchStatus};
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for MatchStatus {
    fn render(&self) -> String {
        match self {
            MatchStatus::Scheduled => "scheduled".to_string(),
            MatchStatus::Completed => "completed".green().to_string(),
            MatchStatus::Canceled => "canceled".red().to_string(),
        }
    }
}

impl Render for Match {
    fn render(&self) -> String {
        let details = self.details();
        let when = match details.time.as_deref() {
            Some(time) => format!("{} {}", details.date, time),
            None => details.date.to_string(),
        };

        let mut line = format!(
            "{}  {} vs {}",
            when.dimmed(),
            details.team_label(),
            details.opponent
        );

        if let Some(score) = self.result() {
            line.push_str(&format!("  {}", score.to_string().bold()));
        }
        if self.status() == MatchStatus::Canceled {
            line.push_str(&format!("  {}", "canceled".red()));
        }
        if self.source() == MatchSource::Ics {
            line.push_str(&format!("  {} {}", "(imported)".dimmed(), self.id().dimmed()));
        }

        line
    }
}

impl Render for MergeReport {
    fn render(&self) -> String {
        match self {
            MergeReport::NoEvents => "no events found".yellow().to_string(),
            MergeReport::AllDuplicates { skipped } => format!(
                "nothing new ({} duplicate{} skipped)",
                skipped,
                plural(*skipped)
            )
            .dimmed()
            .to_string(),
            MergeReport::Imported { added, skipped } => {
                let mut line = format!("{added} imported").green().to_string();
                if *skipped > 0 {
                    line.push_str(
                        &format!(" ({} duplicate{} skipped)", skipped, plural(*skipped))
                            .dimmed()
                            .to_string(),
                    );
                }
                line
            }
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
