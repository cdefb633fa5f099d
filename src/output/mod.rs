//! Output module for exporting crawl results
//!
//! This module handles:
//! - The redirect mapping spreadsheet (CSV) and full report (JSON)
//! - Ready-to-paste redirect configuration for Next.js and Vercel
//! - The console summary printed after a crawl

mod csv_export;
mod json_export;
mod redirects;
mod summary;

pub use csv_export::CsvExporter;
pub use json_export::{JsonExporter, JsonPage, JsonReport};
pub use redirects::{redirect_entries, NextjsRedirectsExporter, RedirectEntry, VercelRedirectsExporter};
pub use summary::{print_summary, render_summary};

use crate::model::CrawlResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A file format that a crawl result can be exported to
pub trait Exporter {
    /// Suffix appended to the output prefix, including the extension
    fn suffix(&self) -> &'static str;

    /// Writes the export for `result` to `out`
    fn write_to(&self, result: &CrawlResult, out: &mut dyn Write) -> OutputResult<()>;

    /// Writes the export to `{prefix}{suffix}`, returning the path written
    fn export(&self, result: &CrawlResult, prefix: &str) -> OutputResult<PathBuf> {
        let path = PathBuf::from(format!("{}{}", prefix, self.suffix()));
        let mut writer = BufWriter::new(File::create(&path)?);
        self.write_to(result, &mut writer)?;
        writer.flush()?;
        Ok(path)
    }
}

/// Writes every export format next to each other under `prefix`
///
/// The parent directory of the prefix is created if it does not exist.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the written files, in write order
/// * `Err(OutputError)` - A directory or file could not be written
///
/// # Example
///
/// ```no_run
/// # use migration_mapper::model::CrawlResult;
/// # fn example(result: &CrawlResult) -> Result<(), Box<dyn std::error::Error>> {
/// use migration_mapper::output::export_all;
///
/// for path in export_all(result, "output/redirect_mapping")? {
///     println!("Wrote {}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn export_all(result: &CrawlResult, prefix: &str) -> OutputResult<Vec<PathBuf>> {
    ensure_parent_dir(prefix)?;

    let exporters: [&dyn Exporter; 4] = [
        &CsvExporter,
        &JsonExporter,
        &NextjsRedirectsExporter,
        &VercelRedirectsExporter,
    ];

    let mut written = Vec::with_capacity(exporters.len());
    for exporter in exporters {
        let path = exporter.export(result, prefix)?;
        tracing::info!("Exported {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Creates the directory that will contain files written under `prefix`
fn ensure_parent_dir(prefix: &str) -> OutputResult<()> {
    if let Some(parent) = Path::new(prefix).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
