// nativecli - ui/mod.rs
//
// UI layer: terminal presentation only.
// Dependencies: core (read-only models), colored.
// Must NOT depend on: platform, direct I/O.

pub mod render;
pub mod theme;
