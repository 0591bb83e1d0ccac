//! Severity levels and the narrow logging capability the helpers write to.

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

pub trait LogSink: Send + Sync {
    fn log(&self, severity: Severity, message: &str);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }
}

/// Emit one message through `tracing`. `Critical` becomes an ERROR event tagged `critical = true`.
pub fn emit(severity: Severity, message: &str) {
    match severity {
        Severity::Debug => tracing::debug!("{}", message),
        Severity::Info => tracing::info!("{}", message),
        Severity::Warning => tracing::warn!("{}", message),
        Severity::Error => tracing::error!("{}", message),
        Severity::Critical => tracing::error!(critical = true, "{}", message),
    }
}

/// Sink backed by the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        emit(severity, message)
    }
}
