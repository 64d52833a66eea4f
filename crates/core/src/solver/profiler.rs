//! Per-pass timing for the solver step
//!
//! Every pass of [`Solver::step`](super::Solver::step) runs inside a
//! [`ProfilerScope`]; the scope's duration lands in [`StepTimings`] under the
//! matching [`Pass`]. Set `RUST_LOG=smoke_sim_core=trace` to see each pass as
//! it completes.

use std::fmt;
use std::time::Instant;
use tracing::trace;

/// The five passes of one solver step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    Forces,
    Project,
    Extrapolate,
    AdvectVelocity,
    AdvectSmoke,
}

impl Pass {
    /// All passes in the order a step runs them
    pub const ALL: [Pass; 5] = [
        Pass::Forces,
        Pass::Project,
        Pass::Extrapolate,
        Pass::AdvectVelocity,
        Pass::AdvectSmoke,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Pass::Forces => "forces",
            Pass::Project => "project",
            Pass::Extrapolate => "extrapolate",
            Pass::AdvectVelocity => "advect_velocity",
            Pass::AdvectSmoke => "advect_smoke",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wall-clock timer for one pass or a whole step
///
/// Emits a `trace` event with the label and duration when dropped.
pub struct ProfilerScope {
    start: Instant,
    label: &'static str,
}

impl ProfilerScope {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            start: Instant::now(),
            label,
        }
    }

    #[must_use]
    pub fn for_pass(pass: Pass) -> Self {
        Self::new(pass.name())
    }

    /// Milliseconds since the scope was opened
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        trace!(pass = self.label, elapsed_ms = self.elapsed_ms(), "pass complete");
    }
}

/// Durations of the most recent run of each pass and of the last full step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepTimings {
    pass_ms: [f64; 5],
    step_ms: f64,
}

impl StepTimings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the duration of `pass`
    pub fn record(&mut self, pass: Pass, elapsed_ms: f64) {
        self.pass_ms[pass.slot()] = elapsed_ms;
    }

    pub fn record_step(&mut self, elapsed_ms: f64) {
        self.step_ms = elapsed_ms;
    }

    #[must_use]
    pub fn pass_ms(&self, pass: Pass) -> f64 {
        self.pass_ms[pass.slot()]
    }

    #[must_use]
    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Pass with the largest recorded duration; `None` before anything ran
    #[must_use]
    pub fn slowest(&self) -> Option<(Pass, f64)> {
        Pass::ALL
            .iter()
            .map(|&pass| (pass, self.pass_ms(pass)))
            .filter(|&(_, ms)| ms > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Add `other` into `self` pass by pass, for averaging over a run
    pub fn accumulate(&mut self, other: &StepTimings) {
        for (total, ms) in self.pass_ms.iter_mut().zip(other.pass_ms) {
            *total += ms;
        }
        self.step_ms += other.step_ms;
    }
}
