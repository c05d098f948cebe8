use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

static THRESHOLD: AtomicU8 = AtomicU8::new(Level::Warn as u8);

/* Maps the number of `-v` flags to a level. Nothing given keeps warnings and errors only */
pub fn level_from_verbosity(occurrences: u64) -> Level {
    match occurrences {
        0 => Level::Warn,
        1 => Level::Info,
        _ => Level::Debug,
    }
}

pub fn set_level(level: Level) {
    THRESHOLD.store(level as u8, Ordering::Relaxed);
}

pub fn enabled(level: Level) -> bool {
    level as u8 <= THRESHOLD.load(Ordering::Relaxed)
}

fn print_log(level: Level, tag: colored::ColoredString, text: String) {
    if !enabled(level) {
        return;
    }

    match level {
        Level::Error | Level::Warn => eprintln!("{} {}", tag, text),
        _ => println!("{} {}", tag, text),
    }
}

pub fn debug(text: String) {
    print_log(Level::Debug, "[DEBUG]".dimmed(), text);
}

pub fn info(text: String) {
    print_log(Level::Info, "[INFO]".cyan(), text);
}

pub fn warn(text: String) {
    print_log(Level::Warn, "[WARN]".yellow(), text);
}

pub fn error(text: String) {
    print_log(Level::Error, "[ERROR]".red(), text);
}
