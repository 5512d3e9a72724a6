//! Markdown run report generation
//!
//! This module renders a [`RunReport`] as a human-readable markdown file,
//! including per-category counts and every skipped item or image.

use crate::output::report::{Failure, RunReport};
use crate::WriteError;
use std::path::Path;

/// Writes a markdown summary of a run
///
/// # Arguments
///
/// * `report` - The finished run report
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(report: &RunReport, output_path: &Path) -> Result<(), WriteError> {
    let markdown = format_markdown_summary(report);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(output_path, markdown).map_err(|source| WriteError::Io {
        path: output_path.to_path_buf(),
        source,
    })
}

/// Formats a run report as markdown
pub fn format_markdown_summary(report: &RunReport) -> String {
    let mut md = String::new();

    md.push_str("# Catalogue Scrape Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration_seconds() {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Categories**: {}\n", report.categories.len()));
    md.push_str(&format!(
        "- **Aborted Categories**: {}\n",
        report.aborted_categories().count()
    ));
    md.push_str(&format!("- **Items Found**: {}\n", report.total_items_found()));
    md.push_str(&format!(
        "- **Items Written**: {}\n",
        report.total_items_written()
    ));
    md.push_str(&format!(
        "- **Images Downloaded**: {}\n",
        report.total_images_downloaded()
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        report.success_rate()
    ));

    // Category breakdown
    if !report.categories.is_empty() {
        md.push_str("## Categories\n\n");
        md.push_str("| Category | Pages | Found | Written | Images | Status |\n");
        md.push_str("|----------|-------|-------|---------|--------|--------|\n");
        for category in &report.categories {
            let status = match &category.error {
                Some(error) => format!("aborted: {}", error),
                None => "ok".to_string(),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                category.name,
                category.pages,
                category.items_found,
                category.items_written,
                category.images_downloaded,
                status
            ));
        }
        md.push('\n');
    }

    let item_failures: Vec<&Failure> = report
        .categories
        .iter()
        .flat_map(|c| c.item_failures.iter())
        .collect();
    push_failure_table(&mut md, "Skipped Items", &item_failures);

    let image_failures: Vec<&Failure> = report
        .categories
        .iter()
        .flat_map(|c| c.image_failures.iter())
        .collect();
    push_failure_table(&mut md, "Failed Images", &image_failures);

    md
}

fn push_failure_table(md: &mut String, title: &str, failures: &[&Failure]) {
    if failures.is_empty() {
        return;
    }

    md.push_str(&format!("## {}\n\n", title));
    md.push_str("| URL | Reason |\n");
    md.push_str("|-----|--------|\n");
    for failure in failures {
        md.push_str(&format!("| {} | {} |\n", failure.url, failure.reason));
    }
    md.push('\n');
}
