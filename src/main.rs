// nativecli - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Tool settings (config.toml) loading
// 3. Logging initialisation (debug mode support)
// 4. Command dispatch and error reporting

mod commands;

pub use nativecli::app;
pub use nativecli::core;
pub use nativecli::platform;
pub use nativecli::ui;
pub use nativecli::util;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// nativecli - Command-line helper for NativePHP projects.
///
/// Follow and filter Laravel/NativePHP logs, scaffold native menus, and
/// manage nativecli configuration.
#[derive(Parser, Debug)]
#[command(name = "nativecli", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display logs from Laravel and native layers
    Logs(commands::logs::LogsArgs),

    /// Generate a native menu and insert it into NativeAppServiceProvider
    #[command(name = "make:menu")]
    MakeMenu(commands::make_menu::MakeMenuArgs),

    /// Configure the nativecli tool
    Config(commands::config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Tool settings are read before tracing starts so [logging] level can
    // take effect; their warnings are reported once tracing is up.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (app_config, config_warnings) = match platform_paths.as_ref() {
        Some(paths) => platform::config::load_config(&paths.config_dir),
        None => (platform::config::AppConfig::default(), Vec::new()),
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    tracing::debug!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "nativecli starting"
    );

    let project_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            report(&util::error::NativeCliError::Io {
                path: PathBuf::from("."),
                operation: "resolve working directory",
                source: e,
            });
            std::process::exit(1);
        }
    };

    let ctx = commands::Context {
        project_dir,
        config: app_config,
        paths: platform_paths,
    };

    let result = match cli.command {
        Command::Logs(args) => commands::logs::run(&ctx, args),
        Command::MakeMenu(args) => commands::make_menu::run(&ctx, args),
        Command::Config(args) => commands::config::run(&ctx, args),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

/// Print an error in red and log its cause chain at debug level.
fn report(e: &util::error::NativeCliError) {
    eprintln!("{}", format!("Error: {e}").red());

    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        tracing::debug!(cause = %cause, "Caused by");
        source = std::error::Error::source(cause);
    }
}
