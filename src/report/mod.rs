//! The results report.
//!
//! The report is plain text written to a file once every check has been
//! evaluated. [`TextReport`] lays out the sections; [`write_report`] puts
//! them on disk.

pub mod text;

pub use text::TextReport;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::engine::Evaluation;
use crate::error::{PreflightError, Result};

/// Render the report to a string.
pub fn render(evaluation: &Evaluation, generated_at: DateTime<Utc>) -> String {
    let mut buffer = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = TextReport::new(generated_at).write(evaluation, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write the report to `path`, replacing any previous report.
pub fn write_report(path: &Path, evaluation: &Evaluation, generated_at: DateTime<Utc>) -> Result<()> {
    write_to(path, evaluation, generated_at).map_err(|e| PreflightError::ReportWriteFailed {
        path: path.to_path_buf(),
        message: format!("{:#}", e),
    })?;

    tracing::debug!("Report written to {}", path.display());
    Ok(())
}

fn write_to(path: &Path, evaluation: &Evaluation, generated_at: DateTime<Utc>) -> anyhow::Result<()> {
    let file = File::create(path).context("creating report file")?;
    let mut writer = BufWriter::new(file);
    TextReport::new(generated_at)
        .write(evaluation, &mut writer)
        .context("writing report sections")?;
    writer.flush().context("flushing report")?;
    Ok(())
}
