//! Severity levels shared by the evaluator, aggregator and reporter.
//!
//! The state itself and its exit code come from `nagiosplugin`; only the
//! roll-up order lives here.

pub use nagiosplugin::ServiceState as Severity;

/// Worst-of roll-up over service states.
///
/// `Ok < Warning < Critical` is the roll-up order. `Unknown` sits outside
/// that order: it means nothing was evaluated, so it never wins against a
/// real verdict.
pub trait Rollup: Copy {
    fn rank(self) -> u8;

    fn label(self) -> &'static str;

    /// Worst of two verdicts
    fn worst(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

impl Rollup for Severity {
    fn rank(self) -> u8 {
        match self {
            Severity::Unknown => 0,
            Severity::Ok => 1,
            Severity::Warning => 2,
            Severity::Critical => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}
