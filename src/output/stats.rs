//! Console summary of a finished run

use crate::output::report::RunReport;

/// Prints a run report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The finished run report
pub fn print_report(report: &RunReport) {
    println!("=== Scrape Summary ===\n");

    println!("Overview:");
    println!("  Categories: {}", report.categories.len());
    println!("  Items found: {}", report.total_items_found());
    println!("  Items written: {}", report.total_items_written());
    println!("  Items skipped: {}", report.total_item_failures());
    println!("  Images downloaded: {}", report.total_images_downloaded());
    println!("  Images failed: {}", report.total_image_failures());
    if let Some(seconds) = report.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Categories:");
    for category in &report.categories {
        let status = match &category.error {
            Some(error) => format!("ABORTED ({})", error),
            None => "ok".to_string(),
        };
        println!(
            "  {}: {} / {} items, {} pages, {}",
            category.name, category.items_written, category.items_found, category.pages, status
        );
    }
    println!();

    let failures: Vec<_> = report
        .categories
        .iter()
        .flat_map(|c| c.item_failures.iter().map(move |f| (&c.name, f)))
        .collect();
    if !failures.is_empty() {
        println!("Skipped Items ({}):", failures.len());
        for (category, failure) in failures {
            println!("  - [{}] {}: {}", category, failure.url, failure.reason);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} items written)",
        report.success_rate(),
        report.total_items_written(),
        report.total_items_found()
    );
}
