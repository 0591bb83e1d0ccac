//! Sampling wrapper for high-frequency log lines.

use super::{LogSink, Severity, TelemetryError};
use std::sync::atomic::{AtomicU64, Ordering};

/// Passes one in every `floor(1 / sample_rate)` debug/info messages to the
/// inner sink. Warnings and above are never sampled.
pub struct SampledLogger<S> {
    sink: S,
    every: u64,
    counter: AtomicU64,
}

impl<S: LogSink> SampledLogger<S> {
    pub fn new(sink: S, sample_rate: f64) -> Result<Self, TelemetryError> {
        if !(sample_rate > 0.0 && sample_rate <= 1.0) {
            return Err(TelemetryError::InvalidSampleRate(sample_rate));
        }
        let every = ((1.0 / sample_rate).floor() as u64).max(1);
        Ok(SampledLogger {
            sink,
            every,
            counter: AtomicU64::new(0),
        })
    }

    pub fn every(&self) -> u64 {
        self.every
    }

    pub fn debug(&self, message: &str) {
        self.sampled(Severity::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.sampled(Severity::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.sink.log(Severity::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.sink.log(Severity::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.sink.log(Severity::Critical, message);
    }

    fn sampled(&self, severity: Severity, message: &str) {
        let every = self.every;
        let prev = self
            .counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                Some(if n + 1 >= every { 0 } else { n + 1 })
            })
            .unwrap_or(0);
        if prev + 1 >= every {
            self.sink.log(severity, message);
        }
    }
}
