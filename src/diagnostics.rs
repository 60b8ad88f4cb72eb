use std::sync::Mutex;

use crate::error::TimestampParseFailure;

/// Sink for advisory diagnostics raised while adapting exchange records.
///
/// Nothing reported here affects the outcome of a conversion; callers get
/// the same result whichever sink is installed.
pub trait Diagnostics: Send + Sync {
    fn timestamp_rejected(&self, failure: &TimestampParseFailure);
}

/// Reports diagnostics as `tracing` warnings.
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn timestamp_rejected(&self, failure: &TimestampParseFailure) {
        tracing::warn!(
            raw = %failure.raw,
            modified = %failure.modified,
            reason = %failure.reason,
            "unable to parse exchange timestamp",
        );
    }
}

/// Keeps every rejection in memory.
#[derive(Default)]
pub struct RecordingDiagnostics {
    rejected: Mutex<Vec<TimestampParseFailure>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejections seen so far, oldest first.
    pub fn rejected(&self) -> Vec<TimestampParseFailure> {
        self.rejected
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn timestamp_rejected(&self, failure: &TimestampParseFailure) {
        let mut guard = self
            .rejected
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(failure.clone());
    }
}
