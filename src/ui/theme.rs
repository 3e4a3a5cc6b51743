// nativecli - ui/theme.rs
//
// Terminal colour scheme for log levels.
// No dependencies on app state or business logic.

use colored::Color;

/// Colour for a lowercase log level. Unknown levels render white.
pub fn level_colour(level: &str) -> Color {
    match level {
        "debug" => Color::White,
        "info" => Color::Green,
        "notice" => Color::Cyan,
        "warning" => Color::Yellow,
        "error" | "critical" | "alert" | "emergency" => Color::Red,
        _ => Color::White,
    }
}

/// Colour of the `[source]` tag.
pub const SOURCE_COLOUR: Color = Color::Cyan;

/// Width the upper-cased level is padded to.
pub const LEVEL_WIDTH: usize = 9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_colours() {
        assert_eq!(level_colour("debug"), Color::White);
        assert_eq!(level_colour("info"), Color::Green);
        assert_eq!(level_colour("notice"), Color::Cyan);
        assert_eq!(level_colour("warning"), Color::Yellow);
        for level in ["error", "critical", "alert", "emergency"] {
            assert_eq!(level_colour(level), Color::Red);
        }
        assert_eq!(level_colour("trace"), Color::White);
    }
}
