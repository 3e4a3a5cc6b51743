// nativecli - commands/mod.rs
//
// Binary-side command handlers: argument structs, prompts, stdout output.
// Everything testable lives in the library; these modules only wire
// arguments and user interaction to it.

pub mod config;
pub mod logs;
pub mod make_menu;

use crate::platform::config::{AppConfig, PlatformPaths};
use std::path::PathBuf;

/// State shared by every command, built once in `main`.
pub struct Context {
    /// Working directory the command operates on.
    pub project_dir: PathBuf,
    /// Validated config.toml settings.
    pub config: AppConfig,
    /// `None` when no home directory could be determined.
    pub paths: Option<PlatformPaths>,
}
