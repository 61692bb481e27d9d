//! # Log Export
//!
//! Hands the finished study log to whoever analyzes it. Two shapes:
//!
//! - `json`: one document with session metadata and the full event list
//! - `jsonl`: one event per line, nothing else
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) so a crash never
//! leaves a half-written record behind.

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::ExportFormat;
use crate::core::journal::{ErrorKind, LogEvent};
use crate::core::session::Session;

#[derive(Serialize, Debug)]
pub struct ExportDocument<'a> {
    pub participant: Option<&'a str>,
    pub started_at: DateTime<Utc>,
    pub exported_at: DateTime<Utc>,
    pub finished: bool,
    pub total_errors: usize,
    pub errors_by_kind: BTreeMap<ErrorKind, usize>,
    pub events: &'a [LogEvent],
}

impl<'a> ExportDocument<'a> {
    pub fn from_session(session: &'a Session) -> Self {
        Self {
            participant: session.participant(),
            started_at: session.started_at(),
            exported_at: Utc::now(),
            finished: session.is_complete(),
            total_errors: session.log().error_count(),
            errors_by_kind: session.log().errors_by_kind(),
            events: session.log().events(),
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "export I/O error: {e}"),
            ExportError::Serialize(e) => write!(f, "export serialization error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Serialize(e)
    }
}

/// Serialize the session log in `format`.
pub fn render(session: &Session, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => {
            let doc = ExportDocument::from_session(session);
            Ok(serde_json::to_string_pretty(&doc)?)
        }
        ExportFormat::Jsonl => {
            let mut out = String::new();
            for event in session.log().events() {
                out.push_str(&serde_json::to_string(event)?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Write the export to `path`, replacing any previous file atomically.
pub fn write_export(session: &Session, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    let body = render(session, format)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, body)?;
    fs::rename(&tmp_path, path)?;
    info!(
        "Exported {} events ({:?}) to {}",
        session.log().len(),
        format,
        path.display()
    );
    Ok(())
}
