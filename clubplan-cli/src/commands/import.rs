use std::path::{Path, PathBuf};

use anyhow::Result;
use owo_colors::OwoColorize;

use clubplan_core::cache::CacheStore;
use clubplan_core::ics::{ParseOptions, parse_events};
use clubplan_core::reconcile::{ImportMeta, merge_imported};

use crate::render::Render;

/// Import one or more ICS schedule files into the local cache.
///
/// Files are processed strictly in the order given; the cache is persisted
/// after every file so an unreadable later file never undoes earlier work.
pub async fn run(cache_store: &CacheStore, files: &[PathBuf], team: Option<String>) -> Result<()> {
    let options = ParseOptions { default_team: team };
    let mut cache = cache_store.load()?;

    let mut total_added = 0;
    let mut total_skipped = 0;

    for path in files {
        println!("{}", path.display().to_string().bold());

        // An unreadable file is a hard failure for that file only; earlier
        // files are already persisted and later ones still get their turn.
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                println!("   {}", format!("Failed to read: {e}").red());
                continue;
            }
        };

        let events = parse_events(&content, &options);
        let meta = ImportMeta {
            file_name: file_name(path),
        };
        let outcome = merge_imported(&events, &meta, &cache);

        if !outcome.added.is_empty() {
            cache_store.save(&outcome.cache)?;
        }

        println!("   {}", outcome.report().render());

        total_added += outcome.added.len();
        total_skipped += outcome.duplicates_skipped;
        cache = outcome.cache;
    }

    if files.len() > 1 {
        println!(
            "\nImported {} match{}, skipped {} duplicate{}",
            total_added,
            if total_added == 1 { "" } else { "es" },
            total_skipped,
            if total_skipped == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("import")
        .to_string()
}
