//! Progress reporting hook.

/// Telemetry for one iteration, handed to a [`ProgressReporter`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Cost of the current route before the move.
    pub current_cost: f64,
    /// Cost of the candidate route.
    pub candidate_cost: f64,
    /// `candidate_cost - current_cost`.
    pub delta: f64,
    /// Temperature after cooling.
    pub temperature: f64,
    /// Acceptance threshold `current_cost - T * ln(u)`.
    pub threshold: f64,
    /// Whether the candidate became the current route.
    pub accepted: bool,
}

/// Receives periodic progress from the annealing loop.
///
/// Reporters only see copies of the loop's numbers and cannot influence
/// the search. Any `FnMut(&Progress)` closure is a reporter.
pub trait ProgressReporter {
    fn report(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> ProgressReporter for F {
    fn report(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Writes each report through the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&mut self, p: &Progress) {
        log::info!(
            target: "tourist::progress",
            "iteration={} current={:.6} candidate={:.6} delta={:.6} temperature={:e} threshold={:.6} accepted={}",
            p.iteration,
            p.current_cost,
            p.candidate_cost,
            p.delta,
            p.temperature,
            p.threshold,
            p.accepted
        );
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&mut self, _progress: &Progress) {}
}
