//! Injectable diagnostics sink.
//!
//! Schema resolution failures are observability events, not errors, so
//! the resolver reports through this capability instead of a
//! process-global logger. Tests swap in [`MemoryDiagnostics`] to inspect
//! what was emitted.

use std::sync::Mutex;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Debug,
    Error,
}

/// Sink for resolver diagnostics, one method per severity.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards diagnostics to the `tracing` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "tenantry", "{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "tenantry", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "tenantry", "{message}");
    }
}

/// Collects diagnostics in memory for later inspection.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, severity: Severity, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }

    /// Snapshot of everything recorded so far, in emission order.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// Messages recorded at the given severity.
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn warn(&self, message: &str) {
        self.push(Severity::Warning, message);
    }

    fn debug(&self, message: &str) {
        self.push(Severity::Debug, message);
    }

    fn error(&self, message: &str) {
        self.push(Severity::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let diag = MemoryDiagnostics::new();

        diag.warn("first");
        diag.debug("second");
        diag.error("third");

        let entries = diag.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (Severity::Warning, "first".to_string()));
        assert_eq!(entries[1], (Severity::Debug, "second".to_string()));
        assert_eq!(entries[2], (Severity::Error, "third".to_string()));
    }

    #[test]
    fn messages_filter_by_severity() {
        let diag = MemoryDiagnostics::new();

        diag.error("boom");
        diag.warn("meh");
        diag.error("again");

        assert_eq!(diag.messages_at(Severity::Error), vec!["boom", "again"]);
        assert_eq!(diag.messages_at(Severity::Debug), Vec::<String>::new());
    }

    #[test]
    fn clear_empties_the_sink() {
        let diag = MemoryDiagnostics::new();
        diag.warn("stale");

        diag.clear();

        assert!(diag.entries().is_empty());
    }
}
