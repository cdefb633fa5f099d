//! Full JSON report of a crawl

use crate::model::{CrawlError, CrawlResult, PageRecord};
use crate::output::{Exporter, OutputResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Writes `{prefix}.json`
pub struct JsonExporter;

/// Serialized shape of the JSON report
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub base_url: &'a str,
    pub generated_at: DateTime<Utc>,
    pub total_pages: usize,
    pub page_types: BTreeMap<&'static str, usize>,
    pub pages: Vec<JsonPage<'a>>,
    pub errors: &'a [CrawlError],
}

/// One entry of [`JsonReport::pages`]
#[derive(Debug, Serialize)]
pub struct JsonPage<'a> {
    pub old_url: &'a str,
    pub page_type: &'static str,
    pub title: &'a str,
    pub h1: &'a str,
    pub meta_description: &'a str,
    pub suggested_redirect: &'a str,
    pub canonical: &'a str,
    pub status_code: u16,
}

impl<'a> From<&'a PageRecord> for JsonPage<'a> {
    fn from(page: &'a PageRecord) -> Self {
        Self {
            old_url: &page.url,
            page_type: page.page_type.as_str(),
            title: &page.title,
            h1: &page.h1,
            meta_description: &page.meta_description,
            suggested_redirect: &page.suggested_redirect,
            canonical: &page.canonical,
            status_code: page.status_code,
        }
    }
}

impl<'a> JsonReport<'a> {
    /// Builds the report for a crawl result
    pub fn new(result: &'a CrawlResult) -> Self {
        let page_types = result
            .page_type_counts()
            .into_iter()
            .map(|(page_type, count)| (page_type.as_str(), count))
            .collect();

        Self {
            base_url: &result.base_url,
            generated_at: Utc::now(),
            total_pages: result.pages.len(),
            page_types,
            pages: result.pages.iter().map(JsonPage::from).collect(),
            errors: &result.errors,
        }
    }
}

impl Exporter for JsonExporter {
    fn suffix(&self) -> &'static str {
        ".json"
    }

    fn write_to(&self, result: &CrawlResult, out: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *out, &JsonReport::new(result))?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
