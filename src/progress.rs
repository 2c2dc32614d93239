//! Download progress display
//!
//! Progress goes through the [`ProgressReporter`] trait so the fetch step does
//! not care whether it is attached to a terminal: an indicatif bar is shown on
//! a TTY, nothing otherwise.

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for cache downloads
pub trait ProgressReporter {
    /// A download of `total` bytes (if known) starts for source `name`
    fn start_download(&mut self, name: &str, total: Option<u64>);

    /// `bytes` more bytes were written
    fn advance(&mut self, bytes: u64);

    /// The current download completed
    fn finish_download(&mut self);

    /// The current download failed
    fn abandon(&mut self);
}

/// Pick the reporter matching stdout
pub fn for_terminal() -> Box<dyn ProgressReporter> {
    if Term::stdout().is_term() {
        Box::new(InteractiveProgressReporter::default())
    } else {
        Box::new(SilentProgressReporter)
    }
}

/// Progress bar per download
#[derive(Default)]
pub struct InteractiveProgressReporter {
    bar: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    fn style(sized: bool) -> ProgressStyle {
        let template = if sized {
            "{msg:>12} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})"
        } else {
            "{msg:>12} {spinner} {bytes}"
        };
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_download(&mut self, name: &str, total: Option<u64>) {
        let bar = match total {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::no_length(),
        };
        bar.set_style(Self::style(total.is_some()));
        bar.set_message(name.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, bytes: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(bytes);
        }
    }

    fn finish_download(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}

/// No-op reporter for non-interactive runs
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start_download(&mut self, _name: &str, _total: Option<u64>) {}

    fn advance(&mut self, _bytes: u64) {}

    fn finish_download(&mut self) {}

    fn abandon(&mut self) {}
}
