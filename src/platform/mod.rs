// nativecli - platform/mod.rs
//
// Platform abstraction layer: directories, config files, signals, raw reads.
// Dependencies: standard library, directories, serde_json, toml, tokio.

pub mod config;
pub mod fs;
pub mod signal;
