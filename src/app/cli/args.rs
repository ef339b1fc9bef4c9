//! Command line arguments and their merge with the configuration file
//!
//! Every tunable is optional here so that "not given" can be told apart from
//! "given with the default value". Values from the command line win over
//! values from the configuration file, which win over built-in defaults.

use crate::app::cli::config::ConfigError;
use crate::core::logging::LogFormat;
use crate::pipeline::api::PipelineSettings;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "drainpipe")]
#[command(about = "Producer, transformer and draining consumer wired through two hand-off queues")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Force colored log output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Colour preference from the configuration file
    #[arg(skip)]
    pub file_color: Option<bool>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Milliseconds between generated messages [default: 250]
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Milliseconds each sink write takes [default: 500]
    #[arg(long = "sink-delay-ms", value_name = "MS")]
    pub sink_delay_ms: Option<u64>,

    /// Input message that ends the run [default: 5]
    #[arg(long = "sentinel", value_name = "TEXT")]
    pub sentinel: Option<String>,

    /// Prefix added to each forwarded message [default: "Transformed "]
    #[arg(long = "prefix", value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Milliseconds between the best-effort puts after cancellation [default: 1]
    #[arg(long = "late-put-gap-ms", value_name = "MS")]
    pub late_put_gap_ms: Option<u64>,

    /// Best-effort messages put after cancellation (configuration file only)
    #[arg(skip)]
    pub late_messages: Option<Vec<String>>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every value not given on the command line from `file`
    pub fn with_fallback(self, file: Args) -> Args {
        Args {
            config_file: self.config_file.or(file.config_file),
            color: self.color,
            no_color: self.no_color,
            file_color: file.file_color,
            log_level: self.log_level.or(file.log_level),
            log_format: self.log_format.or(file.log_format),
            log_file: self.log_file.or(file.log_file),
            interval_ms: self.interval_ms.or(file.interval_ms),
            sink_delay_ms: self.sink_delay_ms.or(file.sink_delay_ms),
            sentinel: self.sentinel.or(file.sentinel),
            prefix: self.prefix.or(file.prefix),
            late_put_gap_ms: self.late_put_gap_ms.or(file.late_put_gap_ms),
            late_messages: self.late_messages.or(file.late_messages),
        }
    }

    /// Apply TOML configuration values to Args
    ///
    /// Unknown keys are ignored. A known key with a value of the wrong type
    /// is an error.
    pub fn apply_toml_values(args: &mut Self, config: &toml::Table) -> Result<(), ConfigError> {
        if let Some(color) = config.get("color") {
            args.file_color = Some(expect_bool(color, "color")?);
        }
        if let Some(log_level) = config.get("log-level") {
            let log_level = expect_str(log_level, "log-level")?;
            if !matches!(
                log_level,
                "trace" | "debug" | "info" | "warn" | "error" | "off"
            ) {
                return Err(invalid("log-level", "one of trace, debug, info, warn, error, off"));
            }
            args.log_level = Some(log_level.to_string());
        }
        if let Some(log_format) = config.get("log-format") {
            let log_format = expect_str(log_format, "log-format")?;
            if LogFormat::from_name(log_format).is_none() {
                return Err(invalid("log-format", "one of text, ext, json"));
            }
            args.log_format = Some(log_format.to_string());
        }
        if let Some(log_file) = config.get("log-file") {
            let log_file = expect_str(log_file, "log-file")?;
            if log_file.eq_ignore_ascii_case("none") || log_file == "-" {
                args.log_file = None;
            } else {
                args.log_file = Some(PathBuf::from(log_file));
            }
        }

        if let Some(value) = config.get("interval-ms") {
            args.interval_ms = Some(expect_millis(value, "interval-ms")?);
        }
        if let Some(value) = config.get("sink-delay-ms") {
            args.sink_delay_ms = Some(expect_millis(value, "sink-delay-ms")?);
        }
        if let Some(value) = config.get("late-put-gap-ms") {
            args.late_put_gap_ms = Some(expect_millis(value, "late-put-gap-ms")?);
        }
        if let Some(sentinel) = config.get("sentinel") {
            args.sentinel = Some(expect_str(sentinel, "sentinel")?.to_string());
        }
        if let Some(prefix) = config.get("prefix") {
            args.prefix = Some(expect_str(prefix, "prefix")?.to_string());
        }

        // Single string or array of strings
        if let Some(value) = config.get("late-messages") {
            let messages = if let Some(single) = value.as_str() {
                vec![single.to_string()]
            } else if let Some(array) = value.as_array() {
                array
                    .iter()
                    .map(|item| expect_str(item, "late-messages").map(str::to_string))
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                return Err(invalid("late-messages", "a string or an array of strings"));
            };
            args.late_messages = Some(messages);
        }

        Ok(())
    }

    /// Whether log output should be coloured
    ///
    /// `--no-color` wins over `--color`, which wins over the file; otherwise
    /// colour is used when standard output is a terminal.
    pub fn use_color(&self) -> bool {
        if self.no_color {
            false
        } else if self.color {
            true
        } else {
            self.file_color
                .unwrap_or_else(|| std::io::stdout().is_terminal())
        }
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
            .as_deref()
            .and_then(LogFormat::from_name)
            .unwrap_or(LogFormat::Text)
    }

    /// Log file to write to, if any; `none` and `-` disable file logging
    pub fn log_file(&self) -> Option<&std::path::Path> {
        self.log_file.as_deref().filter(|path| {
            let name = path.to_string_lossy();
            !(name.eq_ignore_ascii_case("none") || name == "-")
        })
    }

    /// Pipeline settings with built-in defaults for anything not configured
    pub fn to_settings(&self) -> PipelineSettings {
        let defaults = PipelineSettings::default();
        PipelineSettings {
            generator_interval: self
                .interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.generator_interval),
            sink_delay: self
                .sink_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.sink_delay),
            sentinel: self.sentinel.clone().unwrap_or(defaults.sentinel),
            transform_prefix: self.prefix.clone().unwrap_or(defaults.transform_prefix),
            late_messages: self.late_messages.clone().unwrap_or(defaults.late_messages),
            late_put_gap: self
                .late_put_gap_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.late_put_gap),
        }
    }
}

fn invalid(key: &str, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        message: format!("'{}' must be {}", key, expected),
    }
}

fn expect_str<'a>(value: &'a toml::Value, key: &str) -> Result<&'a str, ConfigError> {
    value.as_str().ok_or_else(|| invalid(key, "a string"))
}

fn expect_bool(value: &toml::Value, key: &str) -> Result<bool, ConfigError> {
    value.as_bool().ok_or_else(|| invalid(key, "true or false"))
}

fn expect_millis(value: &toml::Value, key: &str) -> Result<u64, ConfigError> {
    value
        .as_integer()
        .and_then(|ms| u64::try_from(ms).ok())
        .ok_or_else(|| invalid(key, "a non-negative integer number of milliseconds"))
}
