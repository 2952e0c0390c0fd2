use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use anyhow::{Error, Result};

/// Reports non-fatal errors to an observability backend.
pub trait ErrorReporter: Send + Sync {
    /// Capture the provided error for later inspection.
    fn capture(&self, error: &Error) -> Result<()>;

    /// Convenience helper to capture a simple message.
    fn capture_message(&self, message: impl Into<Cow<'static, str>>) -> Result<()>
    where
        Self: Sized,
    {
        let message: Cow<'static, str> = message.into();
        self.capture(&Error::msg(message))
    }
}

/// Error reporting implementation that drops every event. Used when the host
/// does not integrate with error monitoring.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopErrorReporter;

impl ErrorReporter for NoopErrorReporter {
    fn capture(&self, _error: &Error) -> Result<()> {
        Ok(())
    }
}

/// Keeps captured errors in memory as display strings.
#[derive(Debug, Default, Clone)]
pub struct MemoryErrorReporter {
    captured: Arc<Mutex<Vec<String>>>,
}

impl MemoryErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far.
    pub fn take(&self) -> Vec<String> {
        match self.captured.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl ErrorReporter for MemoryErrorReporter {
    fn capture(&self, error: &Error) -> Result<()> {
        let mut guard = self
            .captured
            .lock()
            .map_err(|_| anyhow::anyhow!("error reporter mutex poisoned"))?;
        guard.push(format!("{error:#}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_reporter_drops_errors() {
        let reporter = NoopErrorReporter;
        let error = Error::msg("test");
        assert!(reporter.capture(&error).is_ok());
        assert!(reporter.capture_message("message").is_ok());
    }

    #[test]
    fn memory_reporter_drains_captured_errors() {
        let reporter = MemoryErrorReporter::new();
        reporter.capture_message("first").unwrap();
        reporter
            .capture(&Error::msg("root").context("outer"))
            .unwrap();

        assert_eq!(reporter.take(), vec!["first", "outer: root"]);
        assert!(reporter.take().is_empty());
    }
}
