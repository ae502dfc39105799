use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const HEADER: [&str; 4] = ["Date", "File", "LastWriteTime", "Message"];

/// Format used for both the `Date` and `LastWriteTime` columns.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What happened to one considered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Deleted,
    DryRun,
    RemovedEmptyDir,
    DryRunEmptyDir,
    /// Full message, including the underlying OS error text.
    Error(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Deleted => f.write_str("deleted"),
            Outcome::DryRun => f.write_str("dry-run"),
            Outcome::RemovedEmptyDir => f.write_str("removed empty dir"),
            Outcome::DryRunEmptyDir => f.write_str("dry-run empty dir"),
            Outcome::Error(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp: DateTime<Local>,
    pub entry_path: PathBuf,
    /// Directories carry no modification time.
    pub last_modified: Option<DateTime<Local>>,
    pub outcome: Outcome,
}

impl AuditRecord {
    pub fn to_row(&self) -> [String; 4] {
        [
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.entry_path.to_string_lossy().into_owned(),
            self.last_modified
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
            self.outcome.to_string(),
        ]
    }
}

/// Anything that can take audit records in order.
pub trait AuditSink {
    fn append(&mut self, record: &AuditRecord) -> Result<(), Error>;
}

/// CSV-backed audit log. Every field is quoted.
///
/// The writer is flushed by `close`; if a run bails out early, dropping the
/// log flushes whatever was buffered.
pub struct AuditLog<W: Write> {
    writer: csv::Writer<W>,
}

impl AuditLog<File> {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: &Path) -> Result<Self, Error> {
        let file = File::create(path).map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> AuditLog<W> {
    pub fn from_writer(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(inner);
        Self { writer }
    }

    pub fn write_header(&mut self) -> Result<(), Error> {
        self.writer.write_record(HEADER)?;
        Ok(())
    }

    pub fn close(mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))
    }
}

impl<W: Write> AuditSink for AuditLog<W> {
    fn append(&mut self, record: &AuditRecord) -> Result<(), Error> {
        self.writer.write_record(record.to_row())?;
        Ok(())
    }
}

/// Keeps records in memory, in append order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<AuditRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AuditRecord> {
        self.records
    }
}

impl AuditSink for MemorySink {
    fn append(&mut self, record: &AuditRecord) -> Result<(), Error> {
        self.records.push(record.clone());
        Ok(())
    }
}
