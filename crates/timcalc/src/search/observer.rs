//! Hooks for reporting search progress

/// Receives progress between passes.
///
/// The engine itself performs no I/O; front ends implement this to surface
/// tolerance relaxation to the user.
pub trait PassObserver {
    /// Called after pass `pass` found nothing, with the tolerance the next
    /// pass will use.
    fn on_relaxed(&mut self, pass: u32, tolerance: f64);
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PassObserver for NoopObserver {
    fn on_relaxed(&mut self, _pass: u32, _tolerance: f64) {}
}

/// Collects relaxation events
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingObserver {
    pub events: Vec<(u32, f64)>,
}

#[cfg(test)]
impl PassObserver for RecordingObserver {
    fn on_relaxed(&mut self, pass: u32, tolerance: f64) {
        self.events.push((pass, tolerance));
    }
}
