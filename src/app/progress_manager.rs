//! Progress bar for the enrichment loop.

use indicatif::{ProgressBar, ProgressStyle};
use steamscore_core::EnrichProgress;

/// Drives an indicatif bar from decile notifications, or does nothing when
/// progress display is off.
#[derive(Debug)]
pub(crate) struct EnrichProgressBar {
    bar: Option<ProgressBar>,
}

impl EnrichProgressBar {
    pub(crate) fn new(enabled: bool, total: usize) -> Self {
        if !enabled || total == 0 {
            return Self { bar: None };
        }
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message("gathering review data");
        Self { bar: Some(bar) }
    }

    pub(crate) fn update(&self, progress: EnrichProgress) {
        if let Some(bar) = &self.bar {
            bar.set_position(progress.done as u64);
            bar.set_message(format!("{}% of games info gathered", progress.percent));
        }
    }

    pub(crate) fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    #[cfg(test)]
    fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }
}
