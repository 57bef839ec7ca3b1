//! Decile progress tracking for the enrichment loop.

/// A coarse progress notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichProgress {
    /// The boundary reached: 0, 10, ... 90.
    pub percent: u8,
    /// Games already enriched when the boundary was reached.
    pub done: usize,
    /// Games in the library.
    pub total: usize,
}

/// Reports each 10% boundary of a fixed-size job at most once.
///
/// Small jobs skip boundaries: with three items the reports are 0, 30 and 60.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: usize,
    next_decile: u8,
}

impl ProgressTracker {
    /// Creates a tracker for `total` items.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            next_decile: 0,
        }
    }

    /// Call before processing item `index` (0-based).
    ///
    /// Returns a notification when `index` reaches a boundary not yet reported.
    pub fn observe(&mut self, index: usize) -> Option<EnrichProgress> {
        if self.total == 0 || index >= self.total {
            return None;
        }
        let decile = u8::try_from(index.saturating_mul(10) / self.total).unwrap_or(u8::MAX);
        if decile >= 10 || decile < self.next_decile {
            return None;
        }
        self.next_decile = decile + 1;
        Some(EnrichProgress {
            percent: decile * 10,
            done: index,
            total: self.total,
        })
    }
}
