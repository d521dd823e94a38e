//! Progress bar utilities.
//!
//! Bars draw to stderr and are hidden when stderr is not a terminal, so
//! scheduled runs only produce log lines.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a byte progress bar for a download.
///
/// An unknown `total_bytes` (0) shows a spinner with the running byte count.
pub fn create_download_progress(total_bytes: u64, file_name: &str) -> ProgressBar {
    if total_bytes == 0 {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {bytes} ({bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Downloading {file_name}..."));
        pb.enable_steady_tick(Duration::from_millis(100));
        return pb;
    }

    let pb = ProgressBar::new(total_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{bar:40.cyan/blue} {percent}% ({bytes}/{total_bytes}, {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    pb.set_message(format!("Downloading {file_name}..."));
    pb
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(message.to_string());
}
