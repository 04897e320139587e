use std::path::Path;

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

/// Parse a level name from config, falling back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the global logger: warnings (or debug with `verbose`) to stderr,
/// plus `level` records appended to `log_file` when it can be opened.
///
/// Best-effort: an unusable log file or an already-installed logger is
/// ignored (logging must never block the shell).
pub fn init(level: LevelFilter, log_file: Option<&Path>, verbose: bool) {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level(verbose),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(file) = log_file.and_then(open_log_file) {
        loggers.push(WriteLogger::new(level, config, file));
    }

    let _ = CombinedLogger::init(loggers);
}

/// Threshold for records echoed to stderr. Per-line outcomes are logged
/// at `info` so they reach the log file without duplicating what the
/// shell already prints.
fn term_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()
}

/// One-line summary of a processed line for the log file.
///
/// Long lines are truncated to 200 characters; embedded newlines become
/// `"; "` so each record stays on one line.
pub fn line_summary(line: &str, status: i32) -> String {
    let truncated: String = line.chars().take(200).collect();
    format!("status={status}\t{}", truncated.replace('\n', "; "))
}
