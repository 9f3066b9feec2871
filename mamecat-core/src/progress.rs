/// The two halves of a catalog build, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// `-verifyroms` batches, reported in 0..=50%.
    Verify,
    /// `-listxml` batches, reported in 50..=100%.
    Details,
}

impl BuildPhase {
    /// Percentage at which this phase starts.
    pub fn offset(&self) -> u8 {
        match self {
            Self::Verify => 0,
            Self::Details => 50,
        }
    }

    /// Share of the overall percentage this phase covers.
    pub fn span(&self) -> u8 {
        50
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Details => "details",
        }
    }
}

/// Position within one phase of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
    pub phase: BuildPhase,
}

impl BatchProgress {
    pub fn new(phase: BuildPhase, processed: usize, total: usize) -> Self {
        Self {
            processed,
            total,
            phase,
        }
    }

    /// Overall build percentage: `offset + round(processed / total * span)`.
    ///
    /// `processed` is clamped to `total`; an empty phase counts as finished.
    pub fn percentage(&self) -> u8 {
        let offset = self.phase.offset();
        let span = self.phase.span();
        if self.total == 0 {
            return offset + span;
        }
        let processed = self.processed.min(self.total);
        let fraction = processed as f64 / self.total as f64;
        offset + (fraction * f64::from(span)).round() as u8
    }
}
