//! Append-only side channel recording leads that could not be enriched.
//!
//! Write failures here are reported through `tracing` and otherwise ignored:
//! losing a log line must never abort a run.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use leadmap_core::Lead;

pub(crate) struct FailureLog<W: Write = File> {
    sink: Option<W>,
    entries: usize,
}

impl FailureLog<File> {
    /// Opens `path` for appending, creating it if needed. If the file cannot
    /// be opened the log is disabled and the error is reported once.
    pub(crate) fn open_or_disabled(path: &Path) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self::new(file),
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "cannot open failure log; failures will only be traced"
                );
                Self {
                    sink: None,
                    entries: 0,
                }
            }
        }
    }
}

impl<W: Write> FailureLog<W> {
    pub(crate) fn new(sink: W) -> Self {
        Self {
            sink: Some(sink),
            entries: 0,
        }
    }

    /// Appends one line: timestamp, row number, company and reason.
    pub(crate) fn record(&mut self, lead: &Lead, reason: &str) {
        self.entries += 1;
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let line = format!(
            "{} row={} company={:?} reason={:?}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            lead.row,
            lead.company,
            reason
        );
        if let Err(e) = sink.write_all(line.as_bytes()).and_then(|()| sink.flush()) {
            tracing::error!(row = lead.row, error = %e, "failed to write failure log entry");
        }
    }

    /// Number of entries recorded so far, including any the sink failed to store.
    pub(crate) fn entries(&self) -> usize {
        self.entries
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> Option<W> {
        self.sink
    }
}
