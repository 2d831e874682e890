use std::fmt::Write as _;

use carscrape_scraper::CompletionStats;
use chrono::Utc;

pub(crate) fn print_summary(stats: &CompletionStats) {
    print!("{}", render_summary(stats));
}

/// Plain-text completion summary: totals, success rate, per-field fill rates,
/// and the overall fill percentage.
pub(crate) fn render_summary(stats: &CompletionStats) -> String {
    let mut out = String::new();
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Harvest summary ({now})");
    let _ = writeln!(out, "  records:      {}", stats.total);
    let _ = writeln!(out, "  successful:   {}", stats.successful);
    let _ = writeln!(out, "  failed:       {}", stats.failed);
    let _ = writeln!(out, "  success rate: {:.1}%", stats.success_rate);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<18}{:>8}{:>9}", "FIELD", "FILLED", "RATE");
    for fill in &stats.fields {
        let _ = writeln!(
            out,
            "{:<18}{:>8}{:>8.1}%",
            fill.field.as_str(),
            fill.filled,
            fill.rate
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "overall fill: {:.1}%", stats.overall_fill_pct);
    out
}
