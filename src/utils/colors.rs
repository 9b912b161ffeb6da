/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Greys out placeholders (`--:--`, empty cells) and leaves real values alone.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Progress bar color: green while there is quota left, yellow near the
/// end, red once the contracted hours are used up.
pub fn color_for_progress(pct: f64) -> &'static str {
    if pct >= 100.0 {
        RED
    } else if pct >= 80.0 {
        YELLOW
    } else {
        GREEN
    }
}
