//! In-memory report store
//!
//! **Responsibilities:**
//! - Ordered collection of submitted reports, newest-first by insertion
//! - Append-only from the intake side, snapshot reads from the triage side
//!
//! Insertion order defines display order. There is no update or delete: the
//! triage workflow in scope is "see and route", not "edit history". The
//! store is shared via `Arc`; the interior lock exists for that sharing,
//! mutation only ever happens in direct response to a submission.

use std::sync::RwLock;

use tracing::debug;

use crate::report::Report;

/// Ordered, append-only collection of submitted reports
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: RwLock<Vec<Report>>,
}

impl ReportStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
        }
    }

    /// Insert a report at the head (most-recent-first).
    ///
    /// Never fails for a well-formed report.
    pub fn append(&self, report: Report) {
        let mut reports = self.reports.write().expect("report store lock poisoned");
        debug!(report_id = %report.id, count = reports.len() + 1, "report appended");
        reports.insert(0, report);
    }

    /// Full ordered snapshot, newest first.
    ///
    /// Returns an owned copy; callers cannot mutate the store through it.
    pub fn all(&self) -> Vec<Report> {
        self.reports.read().expect("report store lock poisoned").clone()
    }

    /// Number of reports submitted so far
    pub fn len(&self) -> usize {
        self.reports.read().expect("report store lock poisoned").len()
    }

    /// Whether no report has been submitted yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
