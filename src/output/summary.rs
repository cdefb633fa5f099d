//! Console summary of a finished crawl

use crate::model::CrawlResult;
use std::fmt::Write;

/// Number of errors listed individually
const ERRORS_SHOWN: usize = 10;

/// Renders the crawl summary as text
///
/// Page types are listed by count, largest first; ties keep the type order.
pub fn render_summary(result: &CrawlResult) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_summary(result, &mut out);
    out
}

fn write_summary(result: &CrawlResult, out: &mut String) -> std::fmt::Result {
    writeln!(out, "=== Crawl Summary ===\n")?;

    writeln!(out, "Overview:")?;
    writeln!(out, "  Site: {}", result.base_url)?;
    writeln!(out, "  Total pages found: {}", result.pages.len())?;
    writeln!(out, "  Errors encountered: {}", result.errors.len())?;
    writeln!(out, "  Duration: {}s", result.duration_seconds())?;
    writeln!(out)?;

    writeln!(out, "Pages by type:")?;
    let mut type_counts: Vec<_> = result.page_type_counts().into_iter().collect();
    type_counts.sort_by(|a, b| b.1.cmp(&a.1));

    for (page_type, count) in type_counts {
        writeln!(out, "  {}: {}", page_type, count)?;
    }

    if !result.errors.is_empty() {
        writeln!(out)?;
        writeln!(out, "Errors:")?;
        for error in result.errors.iter().take(ERRORS_SHOWN) {
            writeln!(out, "  {}: {}", error.url, error.message)?;
        }
        if result.errors.len() > ERRORS_SHOWN {
            writeln!(
                out,
                "  ... and {} more errors",
                result.errors.len() - ERRORS_SHOWN
            )?;
        }
    }

    Ok(())
}

/// Prints the crawl summary to stdout
pub fn print_summary(result: &CrawlResult) {
    println!("{}", render_summary(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CrawlError, PageType};
    use crate::output::test_support::{page, sample_result};

    #[test]
    fn test_summary_totals() {
        let summary = render_summary(&sample_result());

        assert!(summary.contains("Total pages found: 4"));
        assert!(summary.contains("Errors encountered: 1"));
        assert!(summary.contains("Duration: 90s"));
        assert!(summary.contains("  https://example.com/gone: HTTP 404"));
        assert!(!summary.contains("more errors"));
    }

    #[test]
    fn test_types_sorted_by_count() {
        let mut result = sample_result();
        result.pages.push(page("https://example.com/blog/a", PageType::Blog, "/blogs/a"));
        result.pages.push(page("https://example.com/blog/b", PageType::Blog, "/blogs/b"));

        let summary = render_summary(&result);
        let blog = summary.find("  blog: 3").unwrap();
        let homepage = summary.find("  homepage: 1").unwrap();
        assert!(blog < homepage);
    }

    #[test]
    fn test_errors_truncated() {
        let mut result = sample_result();
        result.errors = (0..13)
            .map(|n| CrawlError {
                url: format!("https://example.com/broken-{}", n),
                status_code: 0,
                message: "Request timeout".to_string(),
            })
            .collect();

        let summary = render_summary(&result);
        assert!(summary.contains("broken-9: Request timeout"));
        assert!(!summary.contains("broken-10:"));
        assert!(summary.contains("  ... and 3 more errors"));
    }
}
