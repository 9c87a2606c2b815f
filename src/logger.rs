use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

static STUDIO_LOGGER: Lazy<StudioLogger> = Lazy::new(StudioLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let max_level = config.min_level;
    STUDIO_LOGGER.update_config(config);

    if let Err(e) = log::set_logger(&*STUDIO_LOGGER) {
        return Err(format!("Failed to set logger: {:?}", e));
    }

    log::set_max_level(max_level);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LevelFilter,
    pub show_colors: bool,
    pub show_emojis: bool,
    pub show_module: bool,
    pub include_timestamp: bool,
    pub timestamp_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: true,
            show_emojis: true,
            show_module: true,
            include_timestamp: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn production() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: false,
            show_emojis: false,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LevelFilter::Debug,
            show_colors: true,
            show_emojis: true,
            ..Default::default()
        }
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Trace => Color::Cyan,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

pub fn level_emoji(level: Level) -> &'static str {
    match level {
        Level::Trace => "🔍",
        Level::Debug => "🐛",
        Level::Info => "💡",
        Level::Warn => "⚠️",
        Level::Error => "❌",
    }
}

struct StudioLogger {
    config: Mutex<LoggerConfig>,
}

impl StudioLogger {
    fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
        }
    }

    fn update_config(&self, new_config: LoggerConfig) {
        let mut config = self.config.lock().unwrap();
        *config = new_config;
    }

    fn format_record(&self, record: &Record, config: &LoggerConfig) -> String {
        let mut output = String::new();

        if config.include_timestamp {
            let timestamp = chrono::Utc::now().format(&config.timestamp_format);
            if config.show_colors {
                output.push_str(&format!("{} ", timestamp.to_string().bright_black()));
            } else {
                output.push_str(&format!("{} ", timestamp));
            }
        }

        let level_str = if config.show_emojis {
            format!("{} {}", level_emoji(record.level()), record.level())
        } else {
            record.level().to_string()
        };

        if config.show_colors {
            output.push_str(&format!(
                "[{}] ",
                level_str.color(level_color(record.level())).bold()
            ));
        } else {
            output.push_str(&format!("[{}] ", level_str));
        }

        if config.show_module {
            let module = record.module_path().unwrap_or("unknown");
            if config.show_colors {
                output.push_str(&format!("{}::", module.bright_blue()));
            } else {
                output.push_str(&format!("{}::", module));
            }
        }

        output.push_str(&record.args().to_string());
        output
    }
}

impl log::Log for StudioLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if let Ok(config) = self.config.lock() {
            metadata.level() <= config.min_level
        } else {
            true
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(config) = self.config.lock() {
                println!("{}", self.format_record(record, &config));
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// Timer for measuring how long one generation round trip takes.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn stop(&self) {
        log::info!(
            "⏱️  '{}' completed in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}
