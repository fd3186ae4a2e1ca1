//! runlog-report - Running Log Summary CLI
//!
//! Validate a running log CSV and print overall and per-runner mileage.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use runlog_core::analytics::Dashboard;
use runlog_core::format::{display_date, display_person, entries_label, format_miles};
use runlog_core::{ingest, Config, ParseOutcome};

#[derive(Parser, Debug)]
#[command(name = "runlog-report")]
#[command(about = "Summarize a running log CSV")]
#[command(version)]
struct Args {
    /// CSV file with date, person, and miles run columns
    file: PathBuf,

    /// Only report on this runner
    #[arg(long)]
    person: Option<String>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Exit with an error when any row fails validation
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = runlog_core::logging::init(&config.logging).ok();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create runtime")?;
    let outcome = runtime
        .block_on(ingest::load_path_async(&args.file))
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let person = args.person.as_deref().map(str::trim);
    let dashboard = Dashboard::build(&outcome.rows, person);
    if let Some(name) = person {
        if !dashboard.persons.iter().any(|p| p == name) {
            anyhow::bail!(
                "Unknown runner: {}. Known runners: {}",
                name,
                dashboard.persons.join(", ")
            );
        }
    }

    match args.export.as_deref() {
        Some("json") => print_json(&outcome, &dashboard)?,
        Some("md") => print_markdown(&args.file, &outcome, &dashboard),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&args.file, &outcome, &dashboard),
    }

    if args.strict && !outcome.errors.is_empty() {
        anyhow::bail!(
            "{} validation error(s) in {}",
            outcome.errors.len(),
            args.file.display()
        );
    }

    Ok(())
}

fn print_terminal(file: &Path, outcome: &ParseOutcome, dashboard: &Dashboard) {
    let title = format!("Running Log: {}", file.display());

    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    if outcome.errors.is_empty() {
        println!(
            "✓ Successfully parsed {} row{} from the CSV file.",
            outcome.rows.len(),
            if outcome.rows.len() == 1 { "" } else { "s" }
        );
    } else {
        println!("VALIDATION ERRORS ({})", outcome.errors.len());
        for error in &outcome.errors {
            println!("   • {}", error.message);
        }
    }
    println!();

    if dashboard.is_empty() {
        println!("  No data available.");
        println!();
        return;
    }

    let overall = &dashboard.overall;
    println!("OVERALL METRICS  ({})", dashboard.overall_description());
    println!(
        "   Total:   {:<14} Average: {}",
        format_miles(overall.total),
        format_miles(overall.average)
    );
    println!(
        "   Min:     {:<14} Max:     {}",
        format_miles(overall.min),
        format_miles(overall.max)
    );
    println!("   Entries: {}", overall.total_entries);
    println!();

    println!("PER-PERSON METRICS");
    for (person, m) in &dashboard.per_person {
        println!(
            "   {:<16} avg {:<10} min {:<10} max {:<10} total {:<11} {}",
            display_person(person),
            format_miles(m.average),
            format_miles(m.min),
            format_miles(m.max),
            format_miles(m.total),
            entries_label(m.entries)
        );
    }
    println!();

    println!("{}", dashboard.chart_title().to_uppercase());
    let peak = dashboard.max_series_miles();
    for point in &dashboard.series {
        let width = if peak > 0.0 {
            ((point.miles / peak) * 30.0).round() as usize
        } else {
            0
        };
        println!(
            "   {}  {:<30} {}",
            display_date(&point.date),
            "█".repeat(width),
            format_miles(point.miles)
        );
    }
    println!();
}

fn print_markdown(file: &Path, outcome: &ParseOutcome, dashboard: &Dashboard) {
    println!("# Running Log: {}", file.display());
    println!();

    if !outcome.errors.is_empty() {
        println!("## Validation Errors");
        println!();
        for error in &outcome.errors {
            println!("- {}", error.message);
        }
        println!();
    }

    if dashboard.is_empty() {
        println!("*No data available.*");
        return;
    }

    let overall = &dashboard.overall;
    println!("## Overall Metrics");
    println!();
    println!("{}", dashboard.overall_description());
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Total | {} |", format_miles(overall.total));
    println!("| Average | {} |", format_miles(overall.average));
    println!("| Min | {} |", format_miles(overall.min));
    println!("| Max | {} |", format_miles(overall.max));
    println!("| Entries | {} |", overall.total_entries);
    println!();

    println!("## Per-Person Metrics");
    println!();
    println!("| Runner | Average | Min | Max | Total | Entries |");
    println!("|--------|---------|-----|-----|-------|---------|");
    for (person, m) in &dashboard.per_person {
        println!(
            "| {} | {} | {} | {} | {} | {} |",
            display_person(person),
            format_miles(m.average),
            format_miles(m.min),
            format_miles(m.max),
            format_miles(m.total),
            m.entries
        );
    }
    println!();

    println!("## {}", dashboard.chart_title());
    println!();
    println!("{}", dashboard.chart_description());
    println!();
    println!("| Date | Miles |");
    println!("|------|-------|");
    for point in &dashboard.series {
        println!("| {} | {} |", display_date(&point.date), point.miles);
    }
}

fn print_json(outcome: &ParseOutcome, dashboard: &Dashboard) -> Result<()> {
    let json = serde_json::json!({
        "success": outcome.success,
        "rows": outcome.rows.len(),
        "errors": outcome.errors,
        "dashboard": dashboard,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
