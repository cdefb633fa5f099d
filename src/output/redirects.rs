//! Redirect configuration for the new site
//!
//! Produces permanent redirect rules from each old path to its suggested
//! destination, as a Next.js `redirects()` snippet and as `vercel.json` rules.

use crate::model::{CrawlResult, PageType};
use crate::output::{Exporter, OutputResult};
use serde::Serialize;
use std::io::Write;

/// A single permanent redirect rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectEntry {
    pub source: String,
    pub destination: String,
    pub permanent: bool,
}

/// Collects redirect rules for every page except the homepage
///
/// Pages whose URL has no path, or that have no suggested destination, are
/// skipped.
pub fn redirect_entries(result: &CrawlResult) -> Vec<RedirectEntry> {
    result
        .pages
        .iter()
        .filter(|page| page.page_type != PageType::Homepage)
        .filter_map(|page| {
            let source = page.path();
            if source.is_empty() || page.suggested_redirect.is_empty() {
                return None;
            }
            Some(RedirectEntry {
                source,
                destination: page.suggested_redirect.clone(),
                permanent: true,
            })
        })
        .collect()
}

/// Writes `{prefix}_nextjs_redirects.ts`
pub struct NextjsRedirectsExporter;

impl Exporter for NextjsRedirectsExporter {
    fn suffix(&self) -> &'static str {
        "_nextjs_redirects.ts"
    }

    fn write_to(&self, result: &CrawlResult, out: &mut dyn Write) -> OutputResult<()> {
        writeln!(out, "// Add this to your next.config.ts")?;
        writeln!(out, "async redirects() {{")?;
        writeln!(out, "  return [")?;
        for entry in redirect_entries(result) {
            writeln!(
                out,
                "    {{ source: '{}', destination: '{}', permanent: true }},",
                escape_single_quoted(&entry.source),
                escape_single_quoted(&entry.destination)
            )?;
        }
        writeln!(out, "  ];")?;
        write!(out, "}}")?;
        Ok(())
    }
}

/// Escapes a value for use inside a single-quoted TypeScript string
fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Writes `{prefix}_vercel_redirects.json`
pub struct VercelRedirectsExporter;

#[derive(Serialize)]
struct VercelConfig {
    redirects: Vec<RedirectEntry>,
}

impl Exporter for VercelRedirectsExporter {
    fn suffix(&self) -> &'static str {
        "_vercel_redirects.json"
    }

    fn write_to(&self, result: &CrawlResult, out: &mut dyn Write) -> OutputResult<()> {
        let config = VercelConfig {
            redirects: redirect_entries(result),
        };
        serde_json::to_writer_pretty(out, &config)?;
        Ok(())
    }
}
