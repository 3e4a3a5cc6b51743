// nativecli - app/mod.rs
//
// Application layer: log aggregation and follow, provider editing,
// project inspection, menu workflow.
// Dependencies: core, platform.
// Must NOT depend on: ui.

pub mod aggregator;
pub mod code_modifier;
pub mod follow;
pub mod locations;
pub mod make_menu;
