// nativecli - core/mod.rs
//
// Core logic layer: log model and parsing, filters, menu generation,
// structural source edits.
// Dependencies: standard library, chrono, regex, serde.
// Must NOT depend on: ui, platform, app, or perform I/O.

pub mod filter;
pub mod menu;
pub mod model;
pub mod parser;
pub mod source_patch;
