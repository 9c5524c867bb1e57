//! Advisory progress callbacks for long-running codec operations.

/// Caller-supplied sink receiving fractional progress (0.0–1.0) and a
/// human-readable status string. Callbacks are advisory only; correctness
/// never depends on them.
pub trait ProgressSink {
    fn report(&mut self, fraction: f64, message: &str);
}

/// Sink that discards every report.
#[derive(Debug, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn report(&mut self, _fraction: f64, _message: &str) {}
}

#[cfg(test)]
pub(crate) struct RecordingSink {
    pub reports: Vec<(f64, String)>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }
}

#[cfg(test)]
impl ProgressSink for RecordingSink {
    fn report(&mut self, fraction: f64, message: &str) {
        self.reports.push((fraction, message.to_string()));
    }
}
