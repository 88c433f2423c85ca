//! Creation progress reporting.

use derive_getters::Getters;

/// Creation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProgressStage {
    /// Waiting for the narrative
    #[display("Writing the story...")]
    Writing,
    /// Illustrating slides
    #[display("Illustrating the story...")]
    Illustrating,
    /// Story stored
    #[display("Done")]
    Done,
}

/// A progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Progress {
    percent: u8,
    stage: ProgressStage,
}

/// Receiver for progress reports.
pub trait ProgressSink: Send + Sync {
    /// Called after every change.
    fn report(&self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn report(&self, progress: Progress) {
        self(progress)
    }
}

/// Percent reached once the narrative is requested.
pub const WRITING_PERCENT: u8 = 10;
/// Percent reached once the narrative is validated.
pub const ILLUSTRATING_PERCENT: u8 = 40;
/// Span shared by all slides.
pub const ILLUSTRATION_SPAN: u8 = 50;

/// Monotonic progress tracker.
///
/// Percentages never decrease and stay below 100 until [`complete`] is
/// called.
///
/// [`complete`]: ProgressTracker::complete
pub struct ProgressTracker<'a> {
    sink: &'a dyn ProgressSink,
    current: Progress,
}

impl<'a> ProgressTracker<'a> {
    /// Start tracking at 0%.
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            current: Progress {
                percent: 0,
                stage: ProgressStage::Writing,
            },
        }
    }

    /// Latest report.
    pub fn current(&self) -> Progress {
        self.current
    }

    /// Move to `percent` in `stage`. Lower values are raised to the current
    /// percent; 100 is only reachable through [`complete`](Self::complete).
    pub fn advance(&mut self, percent: u8, stage: ProgressStage) {
        let percent = percent.clamp(self.current.percent, 99);
        self.current = Progress { percent, stage };
        tracing::debug!(percent, stage = %stage, "Progress");
        self.sink.report(self.current);
    }

    /// Report that `completed` of `total` slides are illustrated.
    pub fn slides_done(&mut self, completed: usize, total: usize) {
        let span = if total == 0 {
            ILLUSTRATION_SPAN as usize
        } else {
            completed.min(total) * ILLUSTRATION_SPAN as usize / total
        };
        // span <= 50, so this fits in u8
        let percent = ILLUSTRATING_PERCENT.saturating_add(span as u8);
        self.advance(percent, ProgressStage::Illustrating);
    }

    /// Report completion (100%).
    pub fn complete(&mut self) {
        self.current = Progress {
            percent: 100,
            stage: ProgressStage::Done,
        };
        self.sink.report(self.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_monotonic_and_capped() {
        let seen = Mutex::new(Vec::new());
        let sink = |p: Progress| seen.lock().unwrap().push(*p.percent());
        let mut tracker = ProgressTracker::new(&sink);

        tracker.advance(40, ProgressStage::Illustrating);
        tracker.advance(10, ProgressStage::Writing);
        tracker.advance(120, ProgressStage::Illustrating);
        tracker.complete();

        assert_eq!(*seen.lock().unwrap(), vec![40, 40, 99, 100]);
    }

    #[test]
    fn test_slides_done_formula() {
        let seen = Mutex::new(Vec::new());
        let sink = |p: Progress| seen.lock().unwrap().push(*p.percent());
        let mut tracker = ProgressTracker::new(&sink);

        for i in 0..3 {
            tracker.slides_done(i + 1, 3);
        }

        // 40 + floor((i+1)/3 * 50)
        assert_eq!(*seen.lock().unwrap(), vec![56, 73, 90]);
    }
}
