//! Terminal progress bar for the scan analysis loop.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};
use meshlint_core::ScanProgress;

/// Progress bar on stderr, hidden in quiet mode or when stderr is not a TTY.
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl TerminalProgress {
    /// Creates the progress sink.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { bar: None, quiet }
    }

    fn make_bar(total: u64) -> ProgressBar {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} Analyzing [{bar:40.cyan/blue}] {pos}/{len} assets {msg}",
                )
                // Template is a static string with valid format specifiers.
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar
    }
}

impl ScanProgress for TerminalProgress {
    fn begin(&mut self, total: usize) {
        if self.quiet || !std::io::stderr().is_terminal() {
            self.bar = Some(ProgressBar::hidden());
        } else {
            self.bar = Some(Self::make_bar(total as u64));
        }
    }

    fn advance(&mut self, asset_name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(asset_name.to_string());
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
