/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Time-left color:
/// \>0 → green
/// \<0 → red (overtime)
/// 0 → reset
pub fn color_for_time_left(seconds: i64) -> &'static str {
    if seconds > 0 {
        GREEN
    } else if seconds < 0 {
        RED
    } else {
        RESET
    }
}

/// Greys out empty record fields ("-" wall times and zero durations).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" || value.trim() == "0h 0m 0s" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        return format!("{GREY}{value}{RESET}");
    }

    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overtime_is_red() {
        assert_eq!(color_for_time_left(-1), RED);
        assert_eq!(color_for_time_left(60), GREEN);
        assert_eq!(color_for_time_left(0), RESET);
    }

    #[test]
    fn stub_fields_are_grey() {
        assert_eq!(colorize_optional("-"), format!("{GREY}-{RESET}"));
        assert_eq!(colorize_optional("7h 30m 0s"), "7h 30m 0s");
        assert_eq!(colorize_in_out("09:00", true), format!("{GREEN}09:00{RESET}"));
    }
}
