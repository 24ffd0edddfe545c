//! End-of-run statistics

use crate::model::RunStatistics;

/// Prints run statistics to stdout in a formatted manner
///
/// Failed poems are listed with their URL so they can be fetched by hand.
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Download Summary ===\n");

    println!("  Poets processed: {}", stats.poets);
    println!("  Poems found: {}", stats.poems_found);
    println!("  Poems saved: {}", stats.saved);
    println!("  Failures: {}", stats.failed());

    if !stats.skipped_poets.is_empty() {
        println!("\nSkipped Poets ({}):", stats.skipped_poets.len());
        for (name, reason) in &stats.skipped_poets {
            println!("  - {}: {}", name, reason);
        }
    }

    if !stats.failures.is_empty() {
        println!("\nFailed Poems ({}):", stats.failures.len());
        for failure in &stats.failures {
            println!("  - {}", failure);
        }
    }

    println!(
        "\nSuccess Rate: {:.1}% ({} / {} poems saved)",
        success_rate(stats),
        stats.saved,
        stats.poems_found
    );
}

fn success_rate(stats: &RunStatistics) -> f64 {
    if stats.poems_found > 0 {
        (stats.saved as f64 / stats.poems_found as f64) * 100.0
    } else {
        0.0
    }
}
