// nativecli - lib.rs
//
// Library entry point, exposing every module for integration testing and
// programmatic use.
//
// Command handlers (prompts, stdout rendering) live in the binary's
// `commands` module and are not part of the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
