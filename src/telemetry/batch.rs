//! Buffers log lines and writes them in groups.

use super::{LogSink, Severity};
use std::sync::Mutex;

const BATCH_HEADER: &str = "BATCH LOG:";

/// Collects messages per severity and flushes them as one line per severity.
/// Flushes when `batch_size` messages are pending, on every error or critical
/// message, on [`BatchLogger::flush`], and on drop.
pub struct BatchLogger<S: LogSink> {
    sink: S,
    batch_size: usize,
    pending: Mutex<[Vec<String>; 5]>,
}

impl<S: LogSink> BatchLogger<S> {
    pub fn new(sink: S, batch_size: usize) -> Self {
        BatchLogger {
            sink,
            batch_size: batch_size.max(1),
            pending: Mutex::new(Default::default()),
        }
    }

    pub fn debug(&self, message: &str) {
        self.add(Severity::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.add(Severity::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.add(Severity::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.add(Severity::Error, message);
        self.flush();
    }

    pub fn critical(&self, message: &str) {
        self.add(Severity::Critical, message);
        self.flush();
    }

    pub fn pending(&self) -> usize {
        self.lock().iter().map(Vec::len).sum()
    }

    /// Write every pending severity, lowest first, and clear the buffers.
    pub fn flush(&self) {
        let drained: [Vec<String>; 5] = std::mem::take(&mut *self.lock());
        for severity in Severity::ALL {
            let messages = &drained[severity.index()];
            if messages.is_empty() {
                continue;
            }
            let line = format!("{}\n{}", BATCH_HEADER, messages.join("\n"));
            self.sink.log(severity, &line);
        }
    }

    fn add(&self, severity: Severity, message: &str) {
        let full = {
            let mut pending = self.lock();
            pending[severity.index()].push(message.to_string());
            pending.iter().map(Vec::len).sum::<usize>() >= self.batch_size
        };
        if full {
            self.flush();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, [Vec<String>; 5]> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: LogSink> Drop for BatchLogger<S> {
    fn drop(&mut self) {
        self.flush();
    }
}
