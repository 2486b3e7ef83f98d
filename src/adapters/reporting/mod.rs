//! Failure reporter adapters.
//!
//! - `ConsoleFailureReporter` - one `title: description` line per report
//! - `CollectingFailureReporter` - keeps reports for inspection

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::ports::{FailureReport, FailureReporter};

/// Writes reports to a terminal stream, usually stderr.
pub struct ConsoleFailureReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleFailureReporter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleFailureReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> FailureReporter for ConsoleFailureReporter<W> {
    fn report(&self, report: &FailureReport) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = writeln!(out, "{}: {}", report.title, report.description).and_then(|()| out.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, description = %report.description, "failure report not written");
        }
    }
}

#[derive(Debug, Default)]
pub struct CollectingFailureReporter {
    reports: Mutex<Vec<FailureReport>>,
}

impl CollectingFailureReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<FailureReport> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&self) -> Vec<FailureReport> {
        std::mem::take(&mut *self.reports.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl FailureReporter for CollectingFailureReporter {
    fn report(&self, report: &FailureReport) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FAILURE_TITLE;

    #[test]
    fn console_reporter_writes_one_line_per_report() {
        let reporter = ConsoleFailureReporter::new(Vec::new());
        reporter.report(&FailureReport::new("Unknown error"));
        reporter.report(&FailureReport::new("request timed out"));

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            output,
            format!("{FAILURE_TITLE}: Unknown error\n{FAILURE_TITLE}: request timed out\n")
        );
    }

    #[test]
    fn collects_and_drains() {
        let reporter = CollectingFailureReporter::new();
        reporter.report(&FailureReport::new("model unavailable"));

        let reports = reporter.drain();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].title, FAILURE_TITLE);
        assert!(reporter.reports().is_empty());
    }
}
