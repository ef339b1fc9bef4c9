//! CLI TOML configuration tests

use clap::Parser;
use drainpipe::app::cli::args::*;
use std::time::Duration;
use toml::Table;

#[test]
fn test_file_values_fill_gaps_left_by_command_line() {
    let mut file_args = Args::default();
    let mut config = Table::new();
    config.insert("interval-ms".to_string(), toml::Value::Integer(40));
    config.insert("sink-delay-ms".to_string(), toml::Value::Integer(80));
    config.insert("log-level".to_string(), toml::Value::String("warn".into()));
    Args::apply_toml_values(&mut file_args, &config).unwrap();

    let cli = Args::try_parse_from(["drainpipe", "--sink-delay-ms", "5", "--log-level", "debug"])
        .unwrap();
    let merged = cli.with_fallback(file_args);
    let settings = merged.to_settings();

    assert_eq!(settings.generator_interval, Duration::from_millis(40));
    assert_eq!(settings.sink_delay, Duration::from_millis(5));
    assert_eq!(merged.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_late_messages_from_file_only() {
    let mut file_args = Args::default();
    let mut config = Table::new();
    config.insert(
        "late-messages".to_string(),
        toml::Value::Array(vec![
            toml::Value::String("bye".into()),
            toml::Value::String("really bye".into()),
        ]),
    );
    Args::apply_toml_values(&mut file_args, &config).unwrap();

    let merged = Args::try_parse_from(["drainpipe"]).unwrap().with_fallback(file_args);
    assert_eq!(merged.to_settings().late_messages, vec!["bye", "really bye"]);
}

#[test]
fn test_negative_duration_in_file_rejected() {
    let mut args = Args::default();
    let mut config = Table::new();
    config.insert("late-put-gap-ms".to_string(), toml::Value::Integer(-1));

    let error = Args::apply_toml_values(&mut args, &config).unwrap_err();
    assert!(error.to_string().contains("late-put-gap-ms"));
}
