//! Redirect mapping spreadsheet
//!
//! One row per page, grouped by page type, with an empty `Notes` column left
//! for manual review.

use crate::model::CrawlResult;
use crate::output::{Exporter, OutputResult};
use std::io::Write;

const HEADER: [&str; 7] = [
    "Old URL",
    "Page Type",
    "Title",
    "H1",
    "Suggested Redirect",
    "Status",
    "Notes",
];

/// Writes `{prefix}.csv`
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn suffix(&self) -> &'static str {
        ".csv"
    }

    fn write_to(&self, result: &CrawlResult, out: &mut dyn Write) -> OutputResult<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(HEADER)?;

        let mut pages: Vec<_> = result.pages.iter().collect();
        pages.sort_by_key(|page| page.page_type.as_str());

        for page in pages {
            let status = page.status_code.to_string();
            writer.write_record([
                page.url.as_str(),
                page.page_type.as_str(),
                page.title.as_str(),
                page.h1.as_str(),
                page.suggested_redirect.as_str(),
                status.as_str(),
                "",
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
