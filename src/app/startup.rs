//! Binary entry: configuration, logging, signals, one pipeline run

use crate::app::cli::Args;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::shutdown::{install_signal_handlers, CancellationSignal};
use crate::core::version;
use crate::pipeline::api::{Pipeline, StdoutSink, StopReason};
use clap::Parser;

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    run(Args::parse()).await
}

/// Run with already parsed command line arguments
pub async fn run(cli: Args) -> i32 {
    // Logging is configured from the merged values, so a bad config file is
    // reported with the command line settings only.
    let (args, config_error) = match cli.clone().merge_config_file().await {
        Ok(args) => (args, None),
        Err(e) => (cli, Some(e)),
    };

    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format(),
        args.log_file(),
        args.use_color(),
    ) {
        eprintln!("Error initialising logging: {}", e);
        return 1;
    }

    if let Some(e) = config_error {
        log_error_with_context(&e, "Loading configuration");
        return 1;
    }

    log::debug!(
        "{} {} built {} ({})",
        version::package_name(),
        env!("CARGO_PKG_VERSION"),
        version::build_time(),
        version::git_hash()
    );
    log::debug!("Final arguments: {:?}", args);

    let settings = args.to_settings();
    let sink = StdoutSink::new(settings.sink_delay);
    let pipeline = match Pipeline::new(settings) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            log_error_with_context(&e, "Configuring pipeline");
            return 1;
        }
    };

    let host_shutdown = CancellationSignal::new();
    install_signal_handlers(host_shutdown.clone());

    match pipeline.run(sink, &host_shutdown).await {
        Ok(report) => {
            if report.stop_reason == StopReason::HostShutdown {
                log::warn!(
                    "stopped early by host shutdown after {} messages",
                    report.processed
                );
            }
            0
        }
        Err(e) => {
            log_error_with_context(&e, "Running pipeline");
            1
        }
    }
}
