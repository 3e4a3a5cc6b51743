// nativecli - commands/logs.rs
//
// `nativecli logs`: show the newest entries across detected log sources,
// or follow them live until Ctrl+C.

use super::Context;
use crate::app::aggregator::LogAggregator;
use crate::app::follow::CancellationToken;
use crate::app::locations::{self, HostEnv};
use crate::core::model::{LogEntry, Platform};
use crate::core::parser::parse_date_bound;
use crate::platform::signal;
use crate::ui::render;
use crate::util::constants::ALL_SOURCES;
use crate::util::error::{NativeCliError, ProjectError, Result};
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Follow log output (tail -f style)
    #[arg(short = 'f', long)]
    follow: bool,

    /// Number of entries to display [default: 50, or [logs] default_lines]
    #[arg(long)]
    lines: Option<usize>,

    /// Filter by log level (debug, info, warning, error, ...)
    #[arg(short = 'l', long)]
    level: Option<String>,

    /// Filter by log source (laravel, native-production, all)
    #[arg(short = 's', long, default_value = ALL_SOURCES)]
    source: String,

    /// Platform type (desktop, mobile)
    #[arg(short = 'p', long, default_value = "desktop")]
    platform: Platform,

    /// Only entries at or after this time (Y-m-d or Y-m-d H:M:S)
    #[arg(long = "start-date")]
    start_date: Option<String>,

    /// Only entries at or before this time (Y-m-d or Y-m-d H:M:S)
    #[arg(long = "end-date")]
    end_date: Option<String>,

    /// Print one JSON object per entry
    #[arg(long)]
    json: bool,

    /// List the log sources being read
    #[arg(short = 'v', long)]
    verbose: bool,
}

pub fn run(ctx: &Context, args: LogsArgs) -> Result<()> {
    locations::require_laravel_project(&ctx.project_dir)?;

    let app_id = locations::detect_app_id(&ctx.project_dir);
    let env = HostEnv::from_process();
    let sources = locations::detect_log_locations(&ctx.project_dir, &app_id, args.platform, &env);

    if sources.is_empty() {
        eprintln!("{}", "Searched locations:".green());
        for candidate in
            locations::candidate_log_locations(&ctx.project_dir, &app_id, args.platform, &env)
        {
            eprintln!("  - {}", candidate.path.display());
        }
        return Err(ProjectError::NoLogSources.into());
    }

    let mut aggregator = LogAggregator::new().with_poll_interval(ctx.config.poll_interval);
    for source in &sources {
        aggregator.add_log_source(&source.name, &source.path);
    }

    if let Some(ref level) = args.level {
        aggregator.filter_by_level(level);
    }
    aggregator.filter_by_source(&args.source);

    let start = args.start_date.as_deref().map(parse_date_bound).transpose()?;
    let end = args.end_date.as_deref().map(parse_date_bound).transpose()?;
    aggregator.filter_by_date(start, end);

    if args.verbose {
        println!("{}", "Log sources:".green());
        for line in render::format_sources(aggregator.log_sources()) {
            println!("{line}");
        }
        println!("Filters: {}", render::format_filters(aggregator.filters()));
        println!();
    }

    if args.follow {
        return follow(&aggregator, args.json);
    }

    let lines = args.lines.unwrap_or(ctx.config.default_lines);
    let logs = aggregator.tail(lines);

    if args.json {
        for entry in &logs {
            print_entry(entry, true);
        }
        return Ok(());
    }

    if logs.is_empty() {
        println!("{}", "No logs found matching the criteria.".green());
        return Ok(());
    }

    for entry in &logs {
        print_entry(entry, false);
    }
    println!();
    println!(
        "{}",
        format!("Displayed {} most recent log entries", logs.len()).green()
    );
    Ok(())
}

fn follow(aggregator: &LogAggregator, json: bool) -> Result<()> {
    let token = CancellationToken::new();
    let handler_token = token.clone();
    signal::on_ctrl_c(move || handler_token.cancel()).map_err(|e| NativeCliError::Io {
        path: std::path::PathBuf::from("<signal>"),
        operation: "install Ctrl+C handler",
        source: e,
    })?;

    if !json {
        println!("{}", "Following logs... (Press Ctrl+C to stop)".green());
        println!();
    }

    aggregator.follow_until_cancelled(|entry| print_entry(entry, json), &token)?;
    Ok(())
}

fn print_entry(entry: &LogEntry, json: bool) {
    if !json {
        println!("{}", render::format_entry(entry));
        return;
    }

    match render::format_entry_json(entry) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(error = %e, "Could not serialise log entry"),
    }
}
