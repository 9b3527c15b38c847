pub mod add;
pub mod cancel;
pub mod edit;
pub mod import;
pub mod remove;
pub mod result;
pub mod schedule;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a store round trip is in flight.
pub fn store_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}
