// Colored terminal output for analysis results.
//
// This module handles all terminal-specific formatting. The main.rs
// display paths delegate here.

use colored::Colorize;

use crate::model::AnalysisResult;

use super::truncate_chars;

/// Display an analysis summary in the terminal.
pub fn print_report(result: &AnalysisResult) {
    println!(
        "\n{}",
        format!("=== Disaster Signal Report ({} posts) ===", result.posts.len()).bold()
    );
    println!();

    println!("  Risk score: {}", colorize_score(result.score));
    println!(
        "  Sentiment:  {} neg / {} neu / {} pos",
        result.sentiment_counts.neg.to_string().red(),
        result.sentiment_counts.neu,
        result.sentiment_counts.pos.to_string().green(),
    );

    if !result.keyword_freq.is_empty() {
        println!("\n  Keywords:");
        for (keyword, count) in &result.keyword_freq {
            println!("    {:<12} {}", keyword, count);
        }
    }

    if !result.times.is_empty() {
        println!("\n  Hourly severity:");
        for bucket in &result.times {
            println!("    {}  avg {:.2}", bucket.time, bucket.avg_severity);
        }
    }

    if !result.posts.is_empty() {
        println!("\n  Posts:");
        for post in &result.posts {
            let preview = truncate_chars(&post.text, 60);
            println!(
                "    [{:>5.2}] {:<12} (conf {:.2}) {}",
                post.severity,
                post.disaster_type,
                post.confidence,
                preview.dimmed(),
            );
        }
    }

    println!();
}

/// Colorize the batch risk score by band.
fn colorize_score(score: u32) -> colored::ColoredString {
    let text = format!("{score}/100");
    match score {
        76..=100 => text.red().bold(),
        51..=75 => text.bright_red(),
        26..=50 => text.yellow(),
        _ => text.green(),
    }
}
