//! Progress reporting for catalog builds.
//!
//! A build reports a single percentage: the verify phase fills 0-50% and
//! the details phase 50-100%.

use mamecat_core::{BatchProgress, BuildPhase};

/// Compute the overall percentage for `progress` and hand it to `callback`.
///
/// Stateless; returns the reported value.
pub fn report<F: FnMut(u8) + ?Sized>(callback: &mut F, progress: BatchProgress) -> u8 {
    let percentage = progress.percentage();
    callback(percentage);
    percentage
}

/// Reports progress for one phase and never lets it go backwards, even when
/// the phase restarts with smaller batches.
pub struct PhaseTracker<'a, F: FnMut(u8) + ?Sized> {
    callback: &'a mut F,
    phase: BuildPhase,
    total: usize,
    high_water: usize,
}

impl<'a, F: FnMut(u8) + ?Sized> PhaseTracker<'a, F> {
    pub fn new(callback: &'a mut F, phase: BuildPhase, total: usize) -> Self {
        Self {
            callback,
            phase,
            total,
            high_water: 0,
        }
    }

    /// Record that `processed` items of the phase are done.
    pub fn advance(&mut self, processed: usize) {
        self.high_water = self.high_water.max(processed);
        report(
            &mut *self.callback,
            BatchProgress::new(self.phase, self.high_water, self.total),
        );
    }

    /// Report the end of the phase.
    pub fn finish(&mut self) {
        self.advance(self.total);
    }
}
