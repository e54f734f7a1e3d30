//! Console summary of a converted report

use colored::{ColoredString, Colorize};

use super::CoverageReport;

/// One summary row per class
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub name: String,
    pub percent: f64,
    pub covered: u64,
    pub valid: u64,
}

pub fn summary_lines(report: &CoverageReport) -> Vec<SummaryLine> {
    report
        .package
        .classes
        .iter()
        .map(|class| SummaryLine {
            name: class.filename.clone(),
            percent: class.line_rate * 100.0,
            covered: class.hit_lines,
            valid: class.interesting_lines,
        })
        .collect()
}

pub fn print_summary(report: &CoverageReport) {
    println!(
        "  {} Line coverage: {} ({}/{} lines, {} files)",
        "📊".cyan(),
        colorize_percent(report.line_rate() * 100.0),
        report.lines_covered(),
        report.lines_valid(),
        report.package.classes.len()
    );

    for line in summary_lines(report) {
        println!(
            "    {} {} {}",
            "•".dimmed(),
            colorize_percent(line.percent),
            line.name
        );
    }
}

fn colorize_percent(percent: f64) -> ColoredString {
    let text = format!("{:>5.1}%", percent);
    if percent >= 80.0 {
        text.green()
    } else if percent >= 50.0 {
        text.yellow()
    } else {
        text.red()
    }
}
