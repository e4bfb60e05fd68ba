//! Logging setup built on flexi_logger
//!
//! One compact line per record: timestamp, level abbreviation, message and
//! the originating source location. Colored output is used when writing to a
//! terminal. The shell initialises logging exactly once at startup.

use std::sync::{Mutex, OnceLock};

// Global static logger handle so the logger outlives startup
static LOGGER_HANDLE: OnceLock<Mutex<flexi_logger::LoggerHandle>> = OnceLock::new();

/// Initialise logging with the given level string (defaults to "info")
pub fn init_logging(
    log_level: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::Logger;

    let level_str = log_level.unwrap_or("info");
    let mut logger = Logger::try_with_str(level_str)?;

    if color_enabled {
        logger = logger.format(simple_color_format);
    } else {
        logger = logger.format(simple_format);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

// Format: "YYYY-MM-DD HH:mm:ss.fff INF message (module/file.rs:42)"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::*;

    let level_colored = match record.level() {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    };

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored,
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

// Convert modshell::layout::host -> layout/host.rs:42
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = if let Some(without_prefix) = target.strip_prefix("modshell::") {
        without_prefix.replace("::", "/") + ".rs"
    } else {
        target.replace("::", "/")
    };

    if let Some(line_num) = line {
        format!("{}:{}", path_like, line_num)
    } else {
        path_like
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_target_strips_crate_prefix() {
        assert_eq!(
            format_target_as_path("modshell::layout::host", Some(42)),
            "layout/host.rs:42"
        );
    }

    #[test]
    fn test_format_target_keeps_foreign_targets() {
        assert_eq!(
            format_target_as_path("tokio::runtime", None),
            "tokio/runtime"
        );
    }

    #[test]
    fn test_simple_format_contains_level_and_message() {
        let mut buffer = Vec::new();
        let mut now = flexi_logger::DeferredNow::new();
        simple_format(
            &mut buffer,
            &mut now,
            &log::Record::builder()
                .level(log::Level::Info)
                .target("modshell::app::shell")
                .args(format_args!("shell ready"))
                .build(),
        )
        .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("INF shell ready"));
        assert!(output.contains("(app/shell.rs"));
    }
}
