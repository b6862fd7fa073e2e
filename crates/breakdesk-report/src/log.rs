// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only CSV report log.
//!
//! The header is written by whichever append creates the file (`create_new`),
//! so concurrent first writers cannot both emit it. Each append is encoded in
//! memory and handed to the OS as one `O_APPEND` write. Appends from this
//! process are additionally serialized by an async mutex.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use breakdesk_core::{BreakdeskError, Report};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Append-only report log backed by a CSV file.
#[derive(Debug)]
pub struct ReportLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReportLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one report row, writing the header first if this call created the file.
    pub async fn append(&self, report: &Report) -> Result<(), BreakdeskError> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        let report_id = report.report_id.clone();
        let report = report.clone();

        let created = tokio::task::spawn_blocking(move || append_row(&path, &report))
            .await
            .map_err(|e| BreakdeskError::Internal(format!("report log task failed: {e}")))??;

        if created {
            info!(path = %self.path.display(), "report log created");
        }
        debug!(report_id = %report_id, path = %self.path.display(), "report appended");
        Ok(())
    }
}

fn log_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> BreakdeskError {
    BreakdeskError::ReportLog {
        source: Box::new(e),
    }
}

/// Blocking append. Returns whether the file was created by this call.
fn append_row(path: &Path, report: &Report) -> Result<bool, BreakdeskError> {
    let header = encode(Report::COLUMNS)?;
    let row = encode(report.row())?;

    let (mut file, created) = match OpenOptions::new().append(true).create_new(true).open(path) {
        Ok(file) => (file, true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            (OpenOptions::new().append(true).open(path).map_err(log_err)?, false)
        }
        Err(e) => return Err(log_err(e)),
    };

    let bytes = if created { [header, row].concat() } else { row };
    commit(path, &mut file, &bytes, created)?;
    Ok(created)
}

fn encode<I, T>(record: I) -> Result<Vec<u8>, BreakdeskError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(record).map_err(log_err)?;
    writer
        .into_inner()
        .map_err(|e| BreakdeskError::Internal(format!("csv buffer flush failed: {e}")))
}

/// Writes `bytes` in one call. If this append created the file and the write
/// fails, the file is removed so the next append writes the header again.
fn commit<W: Write>(
    path: &Path,
    file: &mut W,
    bytes: &[u8],
    created: bool,
) -> Result<(), BreakdeskError> {
    let Err(e) = file.write_all(bytes).and_then(|()| file.flush()) else {
        return Ok(());
    };
    if created && let Err(cleanup) = std::fs::remove_file(path) {
        warn!(
            path = %path.display(),
            error = %cleanup,
            "could not remove report log after failed first write"
        );
    }
    Err(log_err(e))
}
