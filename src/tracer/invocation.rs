//! What happened during one traced invocation.

use crate::Error;

/// Why no report was sent for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The event could not be snapshotted (not representable as JSON).
    CaptureFailed,

    /// The event had no non-empty `request` key.
    NoRequest,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::CaptureFailed => write!(f, "event capture failed"),
            SkipReason::NoRequest => write!(f, "no request in event"),
        }
    }
}

/// The fate of an invocation's trace report.
///
/// | Outcome   | Meaning                                                  |
/// |-----------|----------------------------------------------------------|
/// | `Skipped` | No report was built                                      |
/// | `Sent`    | The collector accepted the report                        |
/// | `Dropped` | Timeout or connection failure, silently discarded        |
/// | `Failed`  | Any other failure; logged at `warn`                      |
///
/// None of these affect the handler's result.
#[derive(Debug)]
pub enum ReportOutcome {
    /// No report was built.
    Skipped(SkipReason),

    /// The report was delivered.
    Sent,

    /// Delivery timed out or could not connect.
    Dropped(Error),

    /// Building or delivering the report failed for another reason.
    Failed(Error),
}

impl ReportOutcome {
    /// Returns `true` if the report was delivered.
    pub fn is_sent(&self) -> bool {
        matches!(self, ReportOutcome::Sent)
    }

    /// Returns `true` if no report was built.
    pub fn is_skipped(&self) -> bool {
        matches!(self, ReportOutcome::Skipped(_))
    }

    /// Returns the delivery error, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            ReportOutcome::Dropped(err) | ReportOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A handler's result alongside what happened to its trace.
///
/// Returned by [`Traced::invoke`](super::Traced::invoke). Use
/// [`Traced::call`](super::Traced::call) when only the result matters.
#[derive(Debug)]
pub struct Invocation<R, E> {
    /// Exactly what the handler returned.
    pub result: Result<R, E>,

    /// What happened to the trace report.
    pub report: ReportOutcome,
}

impl<R, E> Invocation<R, E> {
    /// Discards the report outcome.
    pub fn into_result(self) -> Result<R, E> {
        self.result
    }
}
