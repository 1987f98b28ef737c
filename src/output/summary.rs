//! Human-readable scan summary

use crate::result::{Performance, ScanResult};
use std::fmt::Write;

/// How many keywords the summary lists
const SUMMARY_KEYWORDS: usize = 10;

/// Prints a scan summary to stdout
pub fn print_summary(result: &ScanResult) {
    print!("{}", format_summary(result));
}

/// Formats a scan summary as plain text
///
/// # Arguments
///
/// * `result` - The scan result
///
/// # Returns
///
/// A multi-section report, ending with a newline
pub fn format_summary(result: &ScanResult) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = write_summary(&mut out, result);
    out
}

fn write_summary(out: &mut String, result: &ScanResult) -> std::fmt::Result {
    writeln!(out, "=== SEO Scan: {} ===\n", result.url)?;
    writeln!(out, "Scanned at: {}", result.timestamp.to_rfc3339())?;
    writeln!(out, "Score: {}/100", result.score)?;
    writeln!(out)?;

    if result.is_degraded() {
        writeln!(out, "Errors:")?;
        for error in &result.errors {
            writeln!(out, "  - {}", error)?;
        }
        return Ok(());
    }

    let metadata = &result.metadata;
    writeln!(out, "Metadata:")?;
    write_field(out, "Title", metadata.title.as_deref())?;
    write_field(out, "Description", metadata.description.as_deref())?;
    write_field(out, "Canonical", metadata.canonical.as_deref())?;
    write_field(out, "Language", metadata.lang.as_deref())?;
    writeln!(out)?;

    writeln!(out, "Headings:")?;
    for level in 1..=6u8 {
        let headings = result.headings.level(level);
        if !headings.is_empty() {
            writeln!(out, "  H{}: {}", level, headings.len())?;
        }
    }
    writeln!(out)?;

    let links = &result.links;
    writeln!(out, "Links:")?;
    writeln!(out, "  Internal: {}", links.internal.len())?;
    writeln!(out, "  External: {}", links.external.len())?;
    writeln!(out, "  Broken: {}", links.broken.len())?;
    for broken in &links.broken {
        writeln!(out, "    * {} ({:?})", broken.url, broken.status)?;
    }
    writeln!(out)?;

    writeln!(out, "Images:")?;
    writeln!(out, "  Total: {}", result.images.total)?;
    writeln!(out, "  Without alt: {}", result.images.without_alt)?;
    writeln!(out)?;

    if let Some(performance) = &result.performance {
        write_performance(out, performance)?;
    }

    if !result.keywords.top_keywords.is_empty() {
        writeln!(out, "Top Keywords:")?;
        for keyword in result.keywords.top_keywords.iter().take(SUMMARY_KEYWORDS) {
            writeln!(
                out,
                "  {}: {} ({:.2}%)",
                keyword.word, keyword.count, keyword.density
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Mobile friendly: {}", yes_no(result.mobile_friendly))?;
    writeln!(
        out,
        "Sitemap: {}",
        result.sitemap.as_deref().unwrap_or("not found")
    )?;
    writeln!(
        out,
        "robots.txt: {}",
        result.robots_txt.as_deref().unwrap_or("not found")
    )?;

    Ok(())
}

fn write_performance(out: &mut String, performance: &Performance) -> std::fmt::Result {
    writeln!(out, "Performance:")?;
    writeln!(out, "  Load time: {:.2}s", performance.load_time)?;

    let timings = [
        ("DOM content loaded", performance.dom_content_loaded),
        ("First contentful paint", performance.first_contentful_paint),
        ("Largest contentful paint", performance.largest_contentful_paint),
        ("Time to interactive", performance.time_to_interactive),
        ("Total blocking time", performance.total_blocking_time),
    ];
    for (label, value) in timings {
        if let Some(seconds) = value {
            writeln!(out, "  {}: {:.2}s", label, seconds)?;
        }
    }
    if let Some(shift) = performance.cumulative_layout_shift {
        writeln!(out, "  Cumulative layout shift: {:.3}", shift)?;
    }
    writeln!(out)
}

fn write_field(out: &mut String, label: &str, value: Option<&str>) -> std::fmt::Result {
    writeln!(out, "  {}: {}", label, value.unwrap_or("(missing)"))
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
